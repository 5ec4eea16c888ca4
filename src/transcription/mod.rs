//! Remote speech-to-text workflow
//!
//! This module drives the three-stage transcription protocol against the
//! remote STT service:
//! - Upload the finished recording to temporary storage
//! - Submit a transcription job referencing the upload
//! - Poll the job until it reaches a terminal state
//!
//! Handles are scoped to a single workflow invocation and are never reused
//! or persisted.

mod cancel;
mod client;
mod error;
mod types;

pub use cancel::{cancellation, CancelHandle, CancelToken};
pub use client::TranscriptionClient;
pub use error::{TranscriptionError, TranscriptionResult};
pub use types::{JobHandle, JobStatus, PollConfig, UploadHandle};
