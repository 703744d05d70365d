//! Webhook endpoint handlers.
//!
//! The relay handler is a straight line:
//! 1. Decode the push event and derive the template parameters
//! 2. Resolve the pipeline id from the query string
//! 3. Check a token is configured
//! 4. Start the pipeline run and report the outcome
//!
//! Any failure along the way is turned into a response in one place.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{RelayError, Result};
use crate::event::{extract_parameters, PushEvent};
use crate::pipeline::{PipelineClient, RunRequest};
use crate::Config;

/// Body returned once Azure DevOps accepts the run.
pub const SUCCESS_MESSAGE: &str = "Pipeline triggered successfully!";

/// Query parameter selecting the pipeline to run.
pub const PIPELINE_ID_PARAM: &str = "pipelineId";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipelines: PipelineClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let pipelines = PipelineClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            pipelines,
        })
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// GitHub → Azure DevOps
// =============================================================================

/// GitHub push webhook endpoint.
///
/// The body is taken as raw bytes and the query string unparsed so that
/// decoding problems surface as relay errors rather than extractor rejections.
pub async fn github_webhook(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    info!(
        body_length = body.len(),
        has_query = query.is_some(),
        "github_webhook_received"
    );

    match relay_push(&state, query.as_deref(), &body).await {
        Ok(()) => {
            info!("pipeline_run_triggered");
            (StatusCode::OK, SUCCESS_MESSAGE).into_response()
        }
        Err(e) => {
            if e.is_downstream_rejection() {
                error!(error = %e, "pipeline_run_rejected");
            } else if !e.is_configuration() {
                // A missing token is logged where it is detected.
                error!(error = %e, "github_webhook_failed");
            }
            e.into_response()
        }
    }
}

/// Everything between receiving the body and hearing back from Azure DevOps.
async fn relay_push(state: &AppState, query: Option<&str>, body: &[u8]) -> Result<()> {
    debug!(payload = %String::from_utf8_lossy(body), "github_webhook_payload");

    let event = PushEvent::from_slice(body)?;
    let params = extract_parameters(&event);

    let pipeline_id = pipeline_id_from_query(query, &state.config.default_pipeline_id);

    let Some(token) = state.config.azure_devops_pat.as_deref() else {
        error!("azure_devops_token_missing");
        return Err(RelayError::MissingCredential);
    };

    let request = RunRequest::new(params);
    let response = state
        .pipelines
        .trigger_run(&pipeline_id, token, &request)
        .await?;

    if response.is_triggered() {
        Ok(())
    } else {
        Err(RelayError::Rejected {
            status: response.status,
            body: response.body,
        })
    }
}

/// First `pipelineId` in the query string, or `default` when there is none.
///
/// The value is not validated; an empty value is kept as-is.
pub fn pipeline_id_from_query(query: Option<&str>, default: &str) -> String {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == PIPELINE_ID_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_else(|| default.to_string())
}
