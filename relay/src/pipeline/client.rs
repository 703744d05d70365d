//! HTTP client for the Azure DevOps pipeline runs API.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{error, info};
use url::Url;

use super::types::RunRequest;
use crate::config::Config;
use crate::error::{RelayError, Result};

/// What Azure DevOps answered to a run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResponse {
    pub status: u16,
    pub body: String,
}

impl RunResponse {
    /// Azure DevOps reports a queued run as either 200 or 201.
    pub fn is_triggered(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// Client for starting pipeline runs in one organization/project.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct PipelineClient {
    client: Client,
    base_url: String,
    organization: String,
    project: String,
    api_version: String,
    timeout: Duration,
}

impl PipelineClient {
    /// Build a client from the relay configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pipeline-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.azure_devops_base_url.clone(),
            organization: config.organization.clone(),
            project: config.project.clone(),
            api_version: config.api_version.clone(),
            timeout,
        })
    }

    /// URL of the runs endpoint for `pipeline_id`.
    ///
    /// Organization and project are percent-encoded as path segments. The
    /// pipeline id is inserted as given, with no validation.
    pub fn run_url(&self, pipeline_id: &str) -> Result<Url> {
        let mut base = Url::parse(&self.base_url)?;
        base.path_segments_mut()
            .map_err(|_| RelayError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&self.organization)
            .push(&self.project)
            .extend(["_apis", "pipelines"]);

        let raw = format!(
            "{}/{}/runs?api-version={}",
            base, pipeline_id, self.api_version
        );
        Ok(Url::parse(&raw)?)
    }

    /// Send one run request and return the status and body unchanged.
    ///
    /// Only transport failures are errors here; deciding what a status code
    /// means is left to the caller.
    pub async fn trigger_run(
        &self,
        pipeline_id: &str,
        token: &str,
        request: &RunRequest,
    ) -> Result<RunResponse> {
        let url = self.run_url(pipeline_id)?;

        info!(
            url = %url,
            pipeline_id = pipeline_id,
            ref_name = request.ref_name(),
            repository_name = %request.template_parameters.repository_name,
            environment = %request.template_parameters.environment,
            "pipeline_run_requesting"
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(
                        pipeline_id = pipeline_id,
                        timeout_seconds = self.timeout.as_secs_f64(),
                        error = %e,
                        "pipeline_run_timeout"
                    );
                } else {
                    error!(pipeline_id = pipeline_id, error = %e, "pipeline_run_request_error");
                }
                e
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        info!(
            pipeline_id = pipeline_id,
            status_code = status,
            body_length = body.len(),
            "pipeline_run_response"
        );

        Ok(RunResponse { status, body })
    }
}
