use super::entry::JournalEntry;
use super::EntryStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// File-backed journal store: the whole list as one JSON document.
///
/// Every operation takes the store lock, so a save's read-modify-write cycle
/// is a single critical section and readers never observe a half-written
/// file through this handle.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current list. A missing file is an empty journal; a corrupt
    /// file reads as empty rather than wedging the journal forever.
    async fn read_entries(&self) -> Result<Vec<JournalEntry>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    warn!(
                        "Journal file {} is corrupt ({}); treating as empty",
                        self.path.display(),
                        e
                    );
                    Ok(Vec::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read journal file: {}", self.path.display())
            }),
        }
    }

    async fn write_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create journal directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_vec_pretty(entries).context("Failed to serialize journal")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write journal file: {}", self.path.display()))
    }
}

#[async_trait::async_trait]
impl EntryStore for JsonFileStore {
    async fn save(&self, entry: JournalEntry) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.insert(0, entry);
        self.write_entries(&entries).await?;

        info!("Journal now holds {} entries", entries.len());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JournalEntry>> {
        let _guard = self.lock.lock().await;
        self.read_entries().await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Journal cleared: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to clear journal file: {}", self.path.display())
            }),
        }
    }
}
