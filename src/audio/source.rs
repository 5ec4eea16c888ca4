use super::payload::AudioPayload;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Supplier of one finished recording.
///
/// Implementations:
/// - File: a recording already encoded on disk (the common path)
/// - In-memory PCM via `payload_from_pcm` for tests and capture bridges
#[async_trait::async_trait]
pub trait AudioSource: Send + Sync {
    /// Produce the payload for the recording. Each call re-reads the
    /// underlying audio, so a manual retry after a failed workflow still
    /// has the recording available.
    async fn payload(&self) -> Result<AudioPayload>;

    /// Reference stored alongside the journal entry (path or URI).
    fn audio_ref(&self) -> String;
}

/// Reads a finished recording from disk.
pub struct FileAudioSource {
    path: PathBuf,
}

impl FileAudioSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl AudioSource for FileAudioSource {
    async fn payload(&self) -> Result<AudioPayload> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read recording: {}", self.path.display()))?;

        if bytes.is_empty() {
            anyhow::bail!("Recording {} is empty", self.path.display());
        }

        let payload = AudioPayload::from_bytes(bytes);
        info!(
            "Loaded recording {}: {} bytes ({})",
            self.path.display(),
            payload.len(),
            payload.content_type()
        );
        Ok(payload)
    }

    fn audio_ref(&self) -> String {
        self.path.display().to_string()
    }
}
