// End-to-end workflow tests: recording file → transcription stub →
// summarization stub → journal store, including cancellation and failure.

mod support;

use anyhow::Result;
use echomind::journal::{JournalWorkflow, WorkflowPhase};
use echomind::{
    payload_from_pcm, EntryStore, FileAudioSource, MemoryStore, PollConfig, SummaryClient,
    TranscriptionClient,
};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use support::{completed, failed, processing, spawn_stt_stub, spawn_summary_stub, SttStub, SummaryStub};
use tempfile::TempDir;

fn fast_poll() -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(20),
        max_attempts: 50,
        overall_timeout: None,
    }
}

/// Write a small WAV recording (one second of 16kHz mono) into `dir`.
async fn write_recording(dir: &TempDir) -> Result<PathBuf> {
    let payload = payload_from_pcm(&[0i16; 16000], 16000, 1)?;
    let path = dir.path().join("recording.wav");
    tokio::fs::write(&path, payload.as_bytes()).await?;
    Ok(path)
}

struct Harness {
    stt: Arc<SttStub>,
    summary_stub: Arc<SummaryStub>,
    transcription: TranscriptionClient,
    summary: SummaryClient,
    store: Arc<MemoryStore>,
}

async fn harness(poll_script: Vec<serde_json::Value>, summary_text: &str) -> Harness {
    let stt = Arc::new(SttStub::with_script(poll_script));
    let stt_base = spawn_stt_stub(Arc::clone(&stt)).await;

    let summary_stub = Arc::new(SummaryStub::with_text(summary_text));
    let summary_base = spawn_summary_stub(Arc::clone(&summary_stub)).await;

    Harness {
        stt,
        summary_stub,
        transcription: TranscriptionClient::new(stt_base, "stt-key"),
        summary: SummaryClient::new(summary_base, "llm-key", "test-model"),
        store: Arc::new(MemoryStore::new()),
    }
}

#[tokio::test]
async fn workflow_saves_transcript_and_summary() -> Result<()> {
    let dir = TempDir::new()?;
    let recording = write_recording(&dir).await?;
    let h = harness(
        vec![processing(), completed("today was a good day")],
        "A calm, grateful entry.",
    )
    .await;

    let workflow = JournalWorkflow::spawn(
        "wf-1".to_string(),
        Arc::new(FileAudioSource::new(&recording)),
        h.transcription,
        h.summary,
        Arc::clone(&h.store) as Arc<dyn EntryStore>,
        fast_poll(),
    );
    workflow.join().await;

    let phase = workflow.phase();
    let WorkflowPhase::Done { entry_id } = phase else {
        panic!("expected Done, got {phase:?}");
    };

    let entries = h.store.list().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry_id);
    assert_eq!(entries[0].transcript, "today was a good day");
    assert_eq!(entries[0].summary, "A calm, grateful entry.");
    assert_eq!(entries[0].audio_ref, recording.display().to_string());

    // Probed from the WAV container
    let duration = entries[0].duration_seconds.expect("duration probed");
    assert!((duration - 1.0).abs() < 0.05);

    assert_eq!(h.summary_stub.hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn phases_progress_in_order() -> Result<()> {
    let dir = TempDir::new()?;
    let recording = write_recording(&dir).await?;
    let h = harness(vec![processing(), completed("words")], "Summary.").await;

    let workflow = JournalWorkflow::spawn(
        "wf-phases".to_string(),
        Arc::new(FileAudioSource::new(&recording)),
        h.transcription,
        h.summary,
        Arc::clone(&h.store) as Arc<dyn EntryStore>,
        fast_poll(),
    );

    let mut rx = workflow.subscribe();
    let mut seen = vec![rx.borrow().clone()];
    while rx.changed().await.is_ok() {
        let phase = rx.borrow().clone();
        let terminal = phase.is_terminal();
        seen.push(phase);
        if terminal {
            break;
        }
    }
    workflow.join().await;

    let positions: Vec<usize> = [
        WorkflowPhase::Uploading,
        WorkflowPhase::Transcribing,
        WorkflowPhase::Summarizing,
        WorkflowPhase::Saving,
    ]
    .iter()
    .filter_map(|p| seen.iter().position(|s| s == p))
    .collect();

    // Watch receivers may skip fast transitions, but whatever was observed
    // must be in pipeline order and end terminal.
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {seen:?}");
    assert!(seen.last().unwrap().is_terminal());
    Ok(())
}

#[tokio::test]
async fn failed_job_saves_nothing_and_reports_detail() -> Result<()> {
    let dir = TempDir::new()?;
    let recording = write_recording(&dir).await?;
    let h = harness(vec![failed("bad audio")], "unused").await;

    let workflow = JournalWorkflow::spawn(
        "wf-fail".to_string(),
        Arc::new(FileAudioSource::new(&recording)),
        h.transcription,
        h.summary,
        Arc::clone(&h.store) as Arc<dyn EntryStore>,
        fast_poll(),
    );
    workflow.join().await;

    let WorkflowPhase::Failed { error } = workflow.phase() else {
        panic!("expected Failed");
    };
    assert!(error.contains("bad audio"), "got: {error}");

    assert!(h.store.list().await?.is_empty());
    assert_eq!(h.summary_stub.hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn cancellation_saves_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let recording = write_recording(&dir).await?;
    let h = harness(vec![processing()], "unused").await;

    let workflow = JournalWorkflow::spawn(
        "wf-cancel".to_string(),
        Arc::new(FileAudioSource::new(&recording)),
        h.transcription,
        h.summary,
        Arc::clone(&h.store) as Arc<dyn EntryStore>,
        PollConfig {
            interval: Duration::from_millis(50),
            max_attempts: 1000,
            overall_timeout: None,
        },
    );

    while h.stt.polls() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    workflow.cancel();
    workflow.join().await;

    assert_eq!(workflow.phase(), WorkflowPhase::Cancelled);
    assert!(h.store.list().await?.is_empty());
    assert_eq!(h.summary_stub.hits.load(Ordering::SeqCst), 0);

    let polls_at_cancel = h.stt.polls();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(h.stt.polls(), polls_at_cancel);
    Ok(())
}

#[tokio::test]
async fn silent_recording_still_becomes_an_entry() -> Result<()> {
    let dir = TempDir::new()?;
    let recording = write_recording(&dir).await?;
    let h = harness(vec![completed("")], "unused").await;

    let workflow = JournalWorkflow::spawn(
        "wf-silent".to_string(),
        Arc::new(FileAudioSource::new(&recording)),
        h.transcription,
        h.summary,
        Arc::clone(&h.store) as Arc<dyn EntryStore>,
        fast_poll(),
    );
    workflow.join().await;

    assert!(matches!(workflow.phase(), WorkflowPhase::Done { .. }));

    let entries = h.store.list().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].transcript, "");
    assert_eq!(entries[0].summary, echomind::summary::EMPTY_TRANSCRIPT_SUMMARY);

    // Empty transcript never touches the summarization API
    assert_eq!(h.summary_stub.hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn missing_recording_fails_before_any_upload() -> Result<()> {
    let h = harness(vec![completed("never seen")], "unused").await;

    let workflow = JournalWorkflow::spawn(
        "wf-missing".to_string(),
        Arc::new(FileAudioSource::new("/nonexistent/rec.wav")),
        h.transcription,
        h.summary,
        Arc::clone(&h.store) as Arc<dyn EntryStore>,
        fast_poll(),
    );
    workflow.join().await;

    assert!(matches!(workflow.phase(), WorkflowPhase::Failed { .. }));
    assert_eq!(h.stt.uploads(), 0);
    assert!(h.store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn concurrent_workflows_are_independent() -> Result<()> {
    let dir = TempDir::new()?;
    let recording = write_recording(&dir).await?;
    let h = harness(vec![processing(), completed("shared transcript")], "Summary.").await;

    let spawn = |id: &str| {
        JournalWorkflow::spawn(
            id.to_string(),
            Arc::new(FileAudioSource::new(&recording)),
            h.transcription.clone(),
            h.summary.clone(),
            Arc::clone(&h.store) as Arc<dyn EntryStore>,
            fast_poll(),
        )
    };

    let first = spawn("wf-a");
    let second = spawn("wf-b");
    first.join().await;
    second.join().await;

    assert!(matches!(first.phase(), WorkflowPhase::Done { .. }));
    assert!(matches!(second.phase(), WorkflowPhase::Done { .. }));
    assert_eq!(h.store.list().await?.len(), 2);
    Ok(())
}
