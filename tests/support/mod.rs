#![allow(dead_code)] // each test binary uses a different slice of this module

// In-process stubs for the remote transcription and summarization services.
//
// No mocking framework: each stub is a small axum router bound to an
// ephemeral port, with per-endpoint hit counters so tests can assert how
// far a workflow got.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted behavior of the transcription stub.
pub struct SttStub {
    /// Status bodies returned by successive polls; the last one repeats.
    pub poll_script: Mutex<Vec<Value>>,
    /// Return HTTP 500 from the upload endpoint.
    pub fail_upload: bool,
    /// Omit the upload_url field from the upload response.
    pub omit_upload_url: bool,
    /// Return HTTP 500 from polls at and after this hit index.
    pub fail_poll_from: Option<usize>,

    pub upload_hits: AtomicUsize,
    pub submit_hits: AtomicUsize,
    pub poll_hits: AtomicUsize,
}

impl SttStub {
    pub fn with_script(poll_script: Vec<Value>) -> Self {
        Self {
            poll_script: Mutex::new(poll_script),
            fail_upload: false,
            omit_upload_url: false,
            fail_poll_from: None,
            upload_hits: AtomicUsize::new(0),
            submit_hits: AtomicUsize::new(0),
            poll_hits: AtomicUsize::new(0),
        }
    }

    pub fn polls(&self) -> usize {
        self.poll_hits.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.upload_hits.load(Ordering::SeqCst)
    }

    pub fn submits(&self) -> usize {
        self.submit_hits.load(Ordering::SeqCst)
    }
}

/// Poll body for a non-terminal status.
pub fn processing() -> Value {
    json!({ "status": "processing" })
}

/// Poll body for terminal success with the given transcript.
pub fn completed(text: &str) -> Value {
    json!({ "status": "completed", "text": text })
}

/// Poll body for terminal failure with the given detail.
pub fn failed(detail: &str) -> Value {
    json!({ "status": "error", "error": detail })
}

async fn upload_handler(State(stub): State<Arc<SttStub>>) -> impl IntoResponse {
    stub.upload_hits.fetch_add(1, Ordering::SeqCst);
    if stub.fail_upload {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upload storage down").into_response();
    }
    if stub.omit_upload_url {
        return Json(json!({})).into_response();
    }
    Json(json!({ "upload_url": "https://stub.invalid/audio/1" })).into_response()
}

async fn submit_handler(State(stub): State<Arc<SttStub>>) -> impl IntoResponse {
    stub.submit_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "id": "job-1" })).into_response()
}

async fn poll_handler(State(stub): State<Arc<SttStub>>) -> impl IntoResponse {
    let hit = stub.poll_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(from) = stub.fail_poll_from {
        if hit >= from {
            return (StatusCode::INTERNAL_SERVER_ERROR, "status backend down").into_response();
        }
    }
    let script = stub.poll_script.lock().unwrap();
    let idx = hit.min(script.len().saturating_sub(1));
    Json(script[idx].clone()).into_response()
}

/// Serve the transcription stub; returns its base URL.
pub async fn spawn_stt_stub(stub: Arc<SttStub>) -> String {
    let app = Router::new()
        .route("/upload", post(upload_handler))
        .route("/transcript", post(submit_handler))
        .route("/transcript/:id", get(poll_handler))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Chat-completion stub returning a fixed summary.
pub struct SummaryStub {
    pub summary_text: String,
    pub hits: AtomicUsize,
}

impl SummaryStub {
    pub fn with_text(summary_text: &str) -> Self {
        Self {
            summary_text: summary_text.to_string(),
            hits: AtomicUsize::new(0),
        }
    }
}

async fn chat_handler(State(stub): State<Arc<SummaryStub>>) -> impl IntoResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "choices": [
            { "message": { "role": "assistant", "content": stub.summary_text } }
        ]
    }))
}

/// Serve the summary stub; returns its base URL.
pub async fn spawn_summary_stub(stub: Arc<SummaryStub>) -> String {
    let app = Router::new()
        .route("/chat/completions", post(chat_handler))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
