use crate::journal::JournalWorkflow;
use crate::store::EntryStore;
use crate::summary::SummaryClient;
use crate::transcription::{PollConfig, TranscriptionClient};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active and finished workflows (workflow_id → workflow)
    pub workflows: Arc<RwLock<HashMap<String, Arc<JournalWorkflow>>>>,

    /// Shared remote-service clients (read-only per workflow)
    pub transcription: TranscriptionClient,
    pub summary: SummaryClient,

    /// Journal persistence
    pub store: Arc<dyn EntryStore>,

    /// Polling behavior handed to each workflow
    pub poll: PollConfig,
}

impl AppState {
    pub fn new(
        transcription: TranscriptionClient,
        summary: SummaryClient,
        store: Arc<dyn EntryStore>,
        poll: PollConfig,
    ) -> Self {
        Self {
            workflows: Arc::new(RwLock::new(HashMap::new())),
            transcription,
            summary,
            store,
            poll,
        }
    }
}
