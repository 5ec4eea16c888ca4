//! Journaling workflow orchestration
//!
//! One workflow per finished recording: read the payload, transcribe it
//! remotely, summarize the transcript, persist the entry. Progress is
//! observable through a watch channel of human-readable phases, and an
//! in-flight workflow can be cancelled without writing anything.

mod stats;
mod workflow;

pub use stats::JournalStats;
pub use workflow::{JournalWorkflow, WorkflowPhase};
