use super::entry::JournalEntry;
use super::EntryStore;
use anyhow::Result;
use tokio::sync::Mutex;

/// In-process journal store for tests and demos.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EntryStore for MemoryStore {
    async fn save(&self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(0, entry);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.entries.lock().await.clone())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.lock().await.clear();
        Ok(())
    }
}
