use crate::audio::{probe_payload, AudioSource};
use crate::store::{EntryStore, JournalEntry};
use crate::summary::SummaryClient;
use crate::transcription::{
    cancellation, CancelHandle, CancelToken, PollConfig, TranscriptionClient, TranscriptionError,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Observable progress of one journaling workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WorkflowPhase {
    Uploading,
    Transcribing,
    Summarizing,
    Saving,
    Done { entry_id: String },
    Failed { error: String },
    Cancelled,
}

impl WorkflowPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowPhase::Done { .. } | WorkflowPhase::Failed { .. } | WorkflowPhase::Cancelled
        )
    }
}

/// One end-to-end journaling invocation running on its own task.
///
/// Workflows are fully independent: the clients they hold are read-only
/// clones, and the only shared mutable state is the entry store, which
/// serializes its own writes. Cancelling before a terminal phase stops
/// further polling and leaves the store untouched.
pub struct JournalWorkflow {
    id: String,
    started_at: DateTime<Utc>,
    phase_rx: watch::Receiver<WorkflowPhase>,
    cancel: CancelHandle,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl JournalWorkflow {
    /// Start a workflow for one finished recording.
    pub fn spawn(
        id: String,
        source: Arc<dyn AudioSource>,
        transcription: TranscriptionClient,
        summary: SummaryClient,
        store: Arc<dyn EntryStore>,
        poll: PollConfig,
    ) -> Self {
        info!("Starting journal workflow: {}", id);

        let (phase_tx, phase_rx) = watch::channel(WorkflowPhase::Uploading);
        let (cancel, cancel_token) = cancellation();

        let workflow_id = id.clone();
        let task = tokio::spawn(async move {
            let outcome = run_workflow(
                &*source,
                &transcription,
                &summary,
                &*store,
                &poll,
                &cancel_token,
                &phase_tx,
            )
            .await;

            match outcome {
                Ok(entry) => {
                    info!("Workflow {} complete: entry {}", workflow_id, entry.id);
                    let _ = phase_tx.send(WorkflowPhase::Done { entry_id: entry.id });
                }
                Err(e) if is_cancellation(&e) => {
                    info!("Workflow {} cancelled", workflow_id);
                    let _ = phase_tx.send(WorkflowPhase::Cancelled);
                }
                Err(e) => {
                    error!("Workflow {} failed: {:#}", workflow_id, e);
                    let _ = phase_tx.send(WorkflowPhase::Failed {
                        error: format!("{:#}", e),
                    });
                }
            }
        });

        Self {
            id,
            started_at: Utc::now(),
            phase_rx,
            cancel,
            task: Mutex::new(Some(task)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current phase snapshot.
    pub fn phase(&self) -> WorkflowPhase {
        self.phase_rx.borrow().clone()
    }

    /// Watch phase transitions as they happen.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowPhase> {
        self.phase_rx.clone()
    }

    /// Request cancellation. No entry is written once this takes effect.
    pub fn cancel(&self) {
        info!("Cancelling workflow: {}", self.id);
        self.cancel.cancel();
    }

    /// Wait for the workflow task to finish. Subsequent calls return
    /// immediately.
    pub async fn join(&self) {
        let task = {
            let mut handle = self.task.lock().await;
            handle.take()
        };
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!("Workflow {} task panicked: {}", self.id, e);
            }
        }
    }
}

fn is_cancellation(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<TranscriptionError>(),
        Some(TranscriptionError::Cancelled)
    )
}

/// The sequential workflow body. Stage errors propagate with their stage
/// preserved; cancellation at any checkpoint aborts before the store write.
async fn run_workflow(
    source: &dyn AudioSource,
    transcription: &TranscriptionClient,
    summary: &SummaryClient,
    store: &dyn EntryStore,
    poll: &PollConfig,
    cancel: &CancelToken,
    phase: &watch::Sender<WorkflowPhase>,
) -> Result<JournalEntry> {
    let payload = source.payload().await.context("Failed to read recording")?;

    // Best-effort duration metadata; a recording symphonia cannot parse
    // still gets transcribed.
    let info = probe_payload(payload.as_bytes()).unwrap_or_default();

    let _ = phase.send(WorkflowPhase::Uploading);
    let upload = transcription.upload(payload).await?;

    if cancel.is_cancelled() {
        return Err(TranscriptionError::Cancelled.into());
    }

    let job = transcription.submit(&upload).await?;

    let _ = phase.send(WorkflowPhase::Transcribing);
    let transcript = transcription.await_result(&job, poll, cancel).await?;

    let _ = phase.send(WorkflowPhase::Summarizing);
    let summary_text = summary
        .summarize(&transcript)
        .await
        .context("Summarization failed")?;

    if cancel.is_cancelled() {
        return Err(TranscriptionError::Cancelled.into());
    }

    let _ = phase.send(WorkflowPhase::Saving);
    let entry = JournalEntry::new(source.audio_ref(), transcript, summary_text)
        .with_duration(info.duration_seconds);
    store
        .save(entry.clone())
        .await
        .context("Failed to save journal entry")?;

    Ok(entry)
}
