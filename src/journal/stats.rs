use crate::store::JournalEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Crude analytics over the stored journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalStats {
    /// Number of stored entries
    pub entry_count: usize,

    /// Words across all transcripts
    pub total_words: usize,

    /// Mean transcript length in words
    pub average_words: f64,

    /// Recorded audio with known duration, in seconds
    pub total_duration_seconds: f64,

    /// Oldest entry timestamp
    pub first_entry_at: Option<DateTime<Utc>>,

    /// Newest entry timestamp
    pub last_entry_at: Option<DateTime<Utc>>,
}

impl JournalStats {
    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let total_words: usize = entries.iter().map(|e| e.word_count()).sum();
        let total_duration_seconds = entries
            .iter()
            .filter_map(|e| e.duration_seconds)
            .sum::<f64>();

        Self {
            entry_count: entries.len(),
            total_words,
            average_words: total_words as f64 / entries.len() as f64,
            total_duration_seconds,
            first_entry_at: entries.iter().map(|e| e.recorded_at).min(),
            last_entry_at: entries.iter().map(|e| e.recorded_at).max(),
        }
    }
}
