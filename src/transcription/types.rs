use std::time::Duration;

/// Storage location returned by the upload endpoint.
///
/// Valid only for the workflow that created it; the URL has no meaning once
/// the transcription job finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadHandle(String);

impl UploadHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_url(&self) -> &str {
        &self.0
    }
}

/// Identifier of a submitted transcription job.
///
/// Consumed by every subsequent status poll; not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State of a transcription job as reported by the service.
///
/// `Completed` and `Failed` are absorbing: a correct caller never polls a
/// job again after observing either one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Job accepted, not yet picked up.
    Queued,
    /// Job running (also the mapping for any unrecognized status string,
    /// so callers keep polling instead of erroring on new service states).
    Processing,
    /// Terminal success. An empty transcript is still a success (silence).
    Completed { transcript: String },
    /// Terminal failure with the service-provided detail.
    Failed { detail: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }

    /// Map the raw status response onto the four-value enumeration.
    ///
    /// The service reports failure as `error` (older variants used `failed`);
    /// both carry the detail in the `error` field.
    pub(crate) fn from_response(status: &str, text: Option<&str>, error: Option<&str>) -> Self {
        match status {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed {
                transcript: text.unwrap_or_default().to_string(),
            },
            "failed" | "error" => JobStatus::Failed {
                detail: error.unwrap_or("unknown error").to_string(),
            },
            _ => JobStatus::Processing,
        }
    }
}

/// Polling behavior for `await_result`.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive status checks.
    pub interval: Duration,
    /// Maximum number of status checks before giving up. Always finite.
    pub max_attempts: u32,
    /// Optional wall-clock budget for the whole polling loop, checked
    /// before each poll.
    pub overall_timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 40,
            overall_timeout: None,
        }
    }
}
