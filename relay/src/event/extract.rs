//! Derive pipeline template parameters from a push event.

use tracing::info;

use super::types::{PushEvent, BRANCH_REF_PREFIX};
use crate::pipeline::TemplateParameters;

/// Everything after the last `/` of `owner/name`, or the whole string.
pub fn repository_name_from_full_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}

/// Strip a leading `refs/heads/`; any other ref is passed through as-is.
pub fn environment_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(git_ref)
}

/// Build the template parameters for a pipeline run from a push event.
pub fn extract_parameters(event: &PushEvent) -> TemplateParameters {
    let params = TemplateParameters {
        repository_name: repository_name_from_full_name(event.full_name()).to_string(),
        environment: environment_from_ref(event.git_ref()).to_string(),
    };

    info!(
        git_ref = %event.git_ref(),
        full_name = %event.full_name(),
        repository_name = %params.repository_name,
        environment = %params.environment,
        "push_event_parsed"
    );

    params
}
