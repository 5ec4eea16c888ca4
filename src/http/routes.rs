use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Workflow control
        .route("/journal/record", post(handlers::start_workflow))
        .route(
            "/journal/record/:workflow_id/status",
            get(handlers::workflow_status),
        )
        .route(
            "/journal/record/:workflow_id/cancel",
            post(handlers::cancel_workflow),
        )
        // Journal queries
        .route(
            "/journal/entries",
            get(handlers::list_entries).delete(handlers::clear_entries),
        )
        .route("/journal/stats", get(handlers::journal_stats))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
