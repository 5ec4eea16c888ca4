use thiserror::Error;

/// Result type alias for transcription operations
pub type TranscriptionResult<T> = Result<T, TranscriptionError>;

/// Classified failures of the transcription workflow.
///
/// Every variant is terminal for the current invocation; nothing is retried
/// automatically. A caller that wants a retry re-runs the whole workflow
/// with fresh handles.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("audio upload failed: {0}")]
    Upload(String),

    #[error("job submission failed: {0}")]
    Submission(String),

    #[error("status poll failed: {0}")]
    Poll(String),

    #[error("transcription failed: {0}")]
    JobFailed(String),

    #[error("transcription timed out after {attempts} status checks")]
    TimedOut { attempts: u32 },

    #[error("transcription cancelled")]
    Cancelled,
}
