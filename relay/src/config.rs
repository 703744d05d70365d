//! Configuration module for environment variable parsing.
//!
//! Everything is read once at start-up. The Azure DevOps coordinates default
//! to the deployment the relay was written for and only need overriding when
//! pointing the relay somewhere else (or at a local mock in tests).

use std::env;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Personal access token sent as the bearer credential to Azure DevOps
    pub azure_devops_pat: Option<String>,

    /// Scheme and host of the Azure DevOps REST API
    pub azure_devops_base_url: String,

    /// Azure DevOps organization name
    pub organization: String,

    /// Azure DevOps project name (unencoded, may contain spaces)
    pub project: String,

    /// `api-version` query value for the pipeline runs API
    pub api_version: String,

    /// Pipeline used when the webhook URL carries no `pipelineId`
    pub default_pipeline_id: String,

    /// Outbound HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            azure_devops_pat: None,
            azure_devops_base_url: "https://dev.azure.com".to_string(),
            organization: "AL2DevOps".to_string(),
            project: "AL2 microservicios".to_string(),
            api_version: "6.0-preview.1".to_string(),
            default_pipeline_id: "93".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: parse_number("PORT", defaults.port),

            // Passed through byte for byte; only an empty value counts as unset.
            azure_devops_pat: env::var("AZURE_DEVOPS_PAT").ok().filter(|v| !v.is_empty()),

            azure_devops_base_url: non_empty("AZURE_DEVOPS_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.azure_devops_base_url),

            organization: non_empty("AZURE_DEVOPS_ORGANIZATION").unwrap_or(defaults.organization),

            project: non_empty("AZURE_DEVOPS_PROJECT").unwrap_or(defaults.project),

            api_version: non_empty("AZURE_DEVOPS_API_VERSION").unwrap_or(defaults.api_version),

            default_pipeline_id: non_empty("DEFAULT_PIPELINE_ID")
                .unwrap_or(defaults.default_pipeline_id),

            request_timeout_ms: parse_number("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
        }
    }
}

/// Read a variable, treating an empty value the same as an unset one.
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a numeric variable, falling back to `default` when unset or invalid.
fn parse_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid numeric value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_valid() {
        env::set_var("TEST_RELAY_PORT", "9090");
        let result: u16 = parse_number("TEST_RELAY_PORT", 8080);
        assert_eq!(result, 9090);
        env::remove_var("TEST_RELAY_PORT");
    }

    #[test]
    fn test_parse_number_invalid_falls_back() {
        env::set_var("TEST_RELAY_TIMEOUT", "soon");
        let result: u64 = parse_number("TEST_RELAY_TIMEOUT", 30_000);
        assert_eq!(result, 30_000);
        env::remove_var("TEST_RELAY_TIMEOUT");
    }

    #[test]
    fn test_parse_number_default() {
        let result: u64 = parse_number("NONEXISTENT_RELAY_VAR", 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_non_empty_treats_blank_as_unset() {
        env::set_var("TEST_RELAY_BLANK", "   ");
        assert_eq!(non_empty("TEST_RELAY_BLANK"), None);
        env::remove_var("TEST_RELAY_BLANK");
    }

    #[test]
    fn test_pat_is_not_trimmed() {
        env::set_var("AZURE_DEVOPS_PAT", "  ");
        assert_eq!(Config::from_env().azure_devops_pat.as_deref(), Some("  "));

        env::set_var("AZURE_DEVOPS_PAT", "");
        assert_eq!(Config::from_env().azure_devops_pat, None);

        env::remove_var("AZURE_DEVOPS_PAT");
    }

    #[test]
    fn test_default_matches_deployment() {
        let config = Config::default();
        assert_eq!(config.azure_devops_base_url, "https://dev.azure.com");
        assert_eq!(config.default_pipeline_id, "93");
        assert_eq!(config.api_version, "6.0-preview.1");
        assert!(config.azure_devops_pat.is_none());
    }
}
