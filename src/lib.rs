pub mod audio;
pub mod config;
pub mod http;
pub mod journal;
pub mod store;
pub mod summary;
pub mod transcription;

pub use audio::{payload_from_pcm, probe_payload, AudioInfo, AudioPayload, AudioSource, FileAudioSource};
pub use config::Config;
pub use http::{create_router, AppState};
pub use journal::{JournalStats, JournalWorkflow, WorkflowPhase};
pub use store::{EntryStore, JournalEntry, JsonFileStore, MemoryStore};
pub use summary::SummaryClient;
pub use transcription::{
    cancellation, CancelHandle, CancelToken, JobHandle, JobStatus, PollConfig,
    TranscriptionClient, TranscriptionError, TranscriptionResult, UploadHandle,
};
