//! Error types for the relay pipeline.
//!
//! Every failure between receiving a webhook and hearing back from Azure
//! DevOps ends up as a `RelayError`, and the conversion into an HTTP response
//! lives here so the handler has exactly one place where errors become
//! responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Message returned when no Azure DevOps token is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Error: authorization token not configured.";

#[derive(Debug, Error)]
pub enum RelayError {
    /// `AZURE_DEVOPS_PAT` was not set when the request arrived.
    #[error("authorization token not configured")]
    MissingCredential,

    /// The webhook body could not be decoded as JSON.
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The webhook body was valid JSON but not an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// The pipeline runs URL could not be built.
    #[error("invalid pipeline URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure talking to Azure DevOps.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Azure DevOps answered with something other than 200 or 201.
    #[error("Error triggering pipeline: {body}")]
    Rejected {
        /// HTTP status code returned by Azure DevOps
        status: u16,
        /// Response body, passed through verbatim
        body: String,
    },
}

impl RelayError {
    /// Status code returned to the webhook sender.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body returned to the webhook sender.
    pub fn message(&self) -> String {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            Self::Rejected { .. } => self.to_string(),
            other => format!("Error processing payload: {other}"),
        }
    }

    /// Returns true if the relay was never configured with a token.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }

    /// Returns true if Azure DevOps received the request and refused it.
    pub fn is_downstream_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_is_server_error_with_fixed_message() {
        let err = RelayError::MissingCredential;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), MISSING_CREDENTIAL_MESSAGE);
        assert!(err.is_configuration());
        assert!(!err.is_downstream_rejection());
    }

    #[test]
    fn rejection_passes_body_through() {
        let err = RelayError::Rejected {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Error triggering pipeline: forbidden");
        assert!(err.is_downstream_rejection());
    }

    #[test]
    fn decode_failure_embeds_parser_description() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let description = parse_err.to_string();
        let err = RelayError::from(parse_err);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), format!("Error processing payload: {description}"));
    }

    #[test]
    fn non_object_payload_is_server_error() {
        let err = RelayError::NotAnObject;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("not a JSON object"));
    }
}
