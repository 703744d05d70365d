//! Body of a pipeline run request.
//!
//! Serializes to:
//!
//! ```json
//! {
//!   "resources": {"repositories": {"self": {"refName": "main"}}},
//!   "templateParameters": {"repository_name": "...", "environment": "..."}
//! }
//! ```

use serde::Serialize;

/// Branch the pipeline checks out, whatever branch was pushed.
///
/// The pushed branch only reaches the pipeline through the `environment`
/// template parameter. Multi-branch triggering would need this to follow the
/// inbound ref instead.
pub const SOURCE_REF_NAME: &str = "main";

/// A request to start one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub resources: RunResources,
    pub template_parameters: TemplateParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResources {
    pub repositories: RunRepositories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRepositories {
    /// The repository the pipeline definition lives in
    #[serde(rename = "self")]
    pub self_repository: RepositoryResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResource {
    pub ref_name: String,
}

/// Template parameters handed to the pipeline.
///
/// Key names are what the pipeline YAML declares, so they stay snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateParameters {
    pub repository_name: String,
    pub environment: String,
}

impl RunRequest {
    /// Build a run request on [`SOURCE_REF_NAME`] with the given parameters.
    pub fn new(template_parameters: TemplateParameters) -> Self {
        Self {
            resources: RunResources {
                repositories: RunRepositories {
                    self_repository: RepositoryResource {
                        ref_name: SOURCE_REF_NAME.to_string(),
                    },
                },
            },
            template_parameters,
        }
    }

    pub fn ref_name(&self) -> &str {
        &self.resources.repositories.self_repository.ref_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_request_wire_format() {
        let request = RunRequest::new(TemplateParameters {
            repository_name: "widgets".to_string(),
            environment: "dev".to_string(),
        });

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "resources": {"repositories": {"self": {"refName": "main"}}},
                "templateParameters": {"repository_name": "widgets", "environment": "dev"}
            })
        );
    }

    #[test]
    fn test_ref_name_ignores_environment() {
        let request = RunRequest::new(TemplateParameters {
            repository_name: "widgets".to_string(),
            environment: "release/2.0".to_string(),
        });
        assert_eq!(request.ref_name(), SOURCE_REF_NAME);
    }
}
