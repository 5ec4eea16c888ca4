use super::state::AppState;
use crate::audio::FileAudioSource;
use crate::journal::{JournalStats, JournalWorkflow, WorkflowPhase};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartWorkflowRequest {
    /// Path to the finished recording on this machine
    pub audio_path: String,

    /// Optional workflow ID (if not provided, generate UUID)
    pub workflow_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartWorkflowResponse {
    pub workflow_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct WorkflowStatusResponse {
    pub workflow_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub phase: WorkflowPhase,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /journal/record
/// Start a journaling workflow for a finished recording
pub async fn start_workflow(
    State(state): State<AppState>,
    Json(req): Json<StartWorkflowRequest>,
) -> impl IntoResponse {
    let workflow_id = req
        .workflow_id
        .unwrap_or_else(|| format!("journal-{}", uuid::Uuid::new_v4()));

    info!("Starting workflow {} for {}", workflow_id, req.audio_path);

    if !std::path::Path::new(&req.audio_path).exists() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Recording not found: {}", req.audio_path),
            }),
        )
            .into_response();
    }

    // Check for an existing workflow with this ID
    {
        let workflows = state.workflows.read().await;
        if workflows.contains_key(&workflow_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Workflow {} already exists", workflow_id),
                }),
            )
                .into_response();
        }
    }

    let workflow = Arc::new(JournalWorkflow::spawn(
        workflow_id.clone(),
        Arc::new(FileAudioSource::new(&req.audio_path)),
        state.transcription.clone(),
        state.summary.clone(),
        Arc::clone(&state.store),
        state.poll.clone(),
    ));

    {
        let mut workflows = state.workflows.write().await;
        workflows.insert(workflow_id.clone(), workflow);
    }

    (
        StatusCode::OK,
        Json(StartWorkflowResponse {
            workflow_id: workflow_id.clone(),
            status: "transcribing".to_string(),
            message: format!("Workflow {} started", workflow_id),
        }),
    )
        .into_response()
}

/// GET /journal/record/:workflow_id/status
/// Current phase of a workflow
pub async fn workflow_status(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> impl IntoResponse {
    let workflows = state.workflows.read().await;

    match workflows.get(&workflow_id) {
        Some(workflow) => (
            StatusCode::OK,
            Json(WorkflowStatusResponse {
                workflow_id,
                started_at: workflow.started_at(),
                phase: workflow.phase(),
            }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Workflow {} not found", workflow_id),
            }),
        )
            .into_response(),
    }
}

/// POST /journal/record/:workflow_id/cancel
/// Cancel an in-flight workflow
pub async fn cancel_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> impl IntoResponse {
    let workflows = state.workflows.read().await;

    match workflows.get(&workflow_id) {
        Some(workflow) => {
            workflow.cancel();
            (
                StatusCode::OK,
                Json(StartWorkflowResponse {
                    workflow_id: workflow_id.clone(),
                    status: "cancelling".to_string(),
                    message: format!("Cancellation requested for {}", workflow_id),
                }),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Workflow {} not found", workflow_id),
            }),
        )
            .into_response(),
    }
}

/// GET /journal/entries
/// Stored journal entries, newest first
pub async fn list_entries(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!("Failed to list entries: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list entries: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /journal/stats
/// Crude analytics over the journal
pub async fn journal_stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(entries) => (StatusCode::OK, Json(JournalStats::from_entries(&entries))).into_response(),
        Err(e) => {
            error!("Failed to compute stats: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to compute stats: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// DELETE /journal/entries
/// Clear the journal
pub async fn clear_entries(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.clear().await {
        Ok(()) => {
            info!("Journal cleared via API");
            (
                StatusCode::OK,
                Json(ClearResponse {
                    status: "cleared".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to clear journal: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to clear journal: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
