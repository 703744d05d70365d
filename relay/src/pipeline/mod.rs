//! Azure DevOps pipeline runs API.
//!
//! This module provides:
//! - Request/response types for `POST .../_apis/pipelines/{id}/runs`
//! - A thin client that sends one run request and reports what came back

pub mod client;
pub mod types;

pub use client::{PipelineClient, RunResponse};
pub use types::{
    RepositoryResource, RunRequest, RunResources, RunRepositories, TemplateParameters,
    SOURCE_REF_NAME,
};
