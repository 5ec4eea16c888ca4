//! HTTP control API for the journaling service
//!
//! The REST surface a recording client drives:
//! - POST /journal/record - Start a workflow for a finished recording
//! - GET /journal/record/:id/status - Query workflow phase
//! - POST /journal/record/:id/cancel - Cancel an in-flight workflow
//! - GET /journal/entries - Stored entries, newest first
//! - GET /journal/stats - Crude journal analytics
//! - DELETE /journal/entries - Clear the journal
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
