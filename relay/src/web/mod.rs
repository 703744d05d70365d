//! Web server module for the GitHub webhook endpoint.
//!
//! This module provides a small web server that:
//! - Receives GitHub push webhooks
//! - Starts the matching Azure DevOps pipeline run
//! - Replies with a plain-text outcome
//!
//! There is no queue in between; the webhook response waits for Azure DevOps.

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    github_webhook, health, pipeline_id_from_query, AppState, HealthResponse, PIPELINE_ID_PARAM,
    SUCCESS_MESSAGE,
};

/// Route GitHub is configured to deliver push events to.
pub const WEBHOOK_PATH: &str = "/api/GitHubToAzureDevOps";

/// GitHub caps webhook payloads at 25 MB.
const MAX_PAYLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(WEBHOOK_PATH, post(github_webhook))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
