//! Pipeline Relay - GitHub push webhooks to Azure DevOps pipeline runs.
//!
//! Each push delivered by GitHub starts one run of an Azure DevOps pipeline,
//! with the repository name and pushed branch passed as template parameters.
//!
//! ## Flow
//!
//! ```text
//! GitHub push → web::github_webhook → event::extract_parameters → PipelineClient → Azure DevOps
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{RelayError, Result};
pub use event::{extract_parameters, PushEvent};
pub use pipeline::{PipelineClient, RunRequest, RunResponse, TemplateParameters};
pub use web::{router, AppState};
