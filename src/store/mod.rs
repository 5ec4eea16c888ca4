//! Local journal persistence
//!
//! Entries live in a single newest-first list. The file-backed store keeps
//! the original "read whole list, prepend, write whole list" contract but
//! serializes every read-modify-write cycle, so concurrently completing
//! workflows cannot lose entries.

mod entry;
mod json;
mod memory;

pub use entry::JournalEntry;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Journal persistence boundary.
#[async_trait::async_trait]
pub trait EntryStore: Send + Sync {
    /// Prepend one entry; the list stays newest-first.
    async fn save(&self, entry: JournalEntry) -> Result<()>;

    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<JournalEntry>>;

    /// Remove every entry.
    async fn clear(&self) -> Result<()>;
}
