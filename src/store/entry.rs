use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted journal entry: the transcript/summary pair for a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry ID
    pub id: String,

    /// When the recording was journaled
    pub recorded_at: DateTime<Utc>,

    /// Path or URI of the source recording
    pub audio_ref: String,

    /// Full transcript (may be empty for a silent recording)
    pub transcript: String,

    /// Generated summary text
    pub summary: String,

    /// Recording length, when the container reported one
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

impl JournalEntry {
    pub fn new(
        audio_ref: impl Into<String>,
        transcript: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            recorded_at: Utc::now(),
            audio_ref: audio_ref.into(),
            transcript: transcript.into(),
            summary: summary.into(),
            duration_seconds: None,
        }
    }

    pub fn with_duration(mut self, duration_seconds: Option<f64>) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    /// Whitespace-separated word count of the transcript.
    pub fn word_count(&self) -> usize {
        self.transcript.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_extra_whitespace() {
        let entry = JournalEntry::new("a.wav", "  today   was a good\nday ", "s");
        assert_eq!(entry.word_count(), 5);
        assert_eq!(JournalEntry::new("a.wav", "", "s").word_count(), 0);
    }

    #[test]
    fn entry_serialization_roundtrip() {
        let entry = JournalEntry::new("/tmp/rec.m4a", "hello world", "A short note")
            .with_duration(Some(12.5));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"audio_ref\":\"/tmp/rec.m4a\""));
        assert!(json.contains("\"duration_seconds\":12.5"));

        let back: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn entry_without_duration_still_deserializes() {
        let json = r#"{
            "id": "abc",
            "recorded_at": "2026-08-29T10:00:00Z",
            "audio_ref": "rec.wav",
            "transcript": "hi",
            "summary": "greeting"
        }"#;

        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "abc");
        assert!(entry.duration_seconds.is_none());
    }
}
