//! GitHub push payload types.
//!
//! Only the handful of fields the relay reads are modelled; everything else in
//! the payload is ignored.

use serde::{Deserialize, Deserializer};

use crate::error::{RelayError, Result};

/// Ref assumed when the payload does not carry one.
pub const DEFAULT_REF: &str = "refs/heads/main";

/// Prefix GitHub puts in front of branch names in `ref`.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// The subset of a GitHub push event the relay cares about.
///
/// A missing field falls back to its default; an explicit `null` is a
/// decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushEvent {
    /// Full git ref that was pushed, e.g. `refs/heads/dev`
    #[serde(default, rename = "ref", deserialize_with = "non_null")]
    pub git_ref: Option<String>,
    /// Repository the push happened in
    #[serde(default, deserialize_with = "non_null")]
    pub repository: Option<Repository>,
}

/// Repository block of a push event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    /// `owner/name`
    #[serde(default, deserialize_with = "non_null")]
    pub full_name: Option<String>,
}

/// Only called for keys that are present, so `null` fails to decode as `T`.
fn non_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PushEvent {
    /// Decode a webhook body.
    ///
    /// The body must be a JSON object. serde would happily map a JSON array
    /// onto the struct positionally, so the shape is checked first.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(RelayError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The pushed ref, or [`DEFAULT_REF`] when absent.
    pub fn git_ref(&self) -> &str {
        self.git_ref.as_deref().unwrap_or(DEFAULT_REF)
    }

    /// `repository.full_name`, or an empty string when either level is absent.
    pub fn full_name(&self) -> &str {
        self.repository
            .as_ref()
            .and_then(|r| r.full_name.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_full_payload() {
        let body = br#"{
            "ref": "refs/heads/dev",
            "before": "3fed5c8005281e5f4d24a1b6074408f603f4192e",
            "repository": {"id": 1, "name": "widgets", "full_name": "acme/widgets"},
            "pusher": {"name": "octocat"}
        }"#;

        let event = PushEvent::from_slice(body).unwrap();
        assert_eq!(event.git_ref(), "refs/heads/dev");
        assert_eq!(event.full_name(), "acme/widgets");
    }

    #[test]
    fn test_from_slice_empty_object_uses_defaults() {
        let event = PushEvent::from_slice(b"{}").unwrap();
        assert_eq!(event.git_ref(), DEFAULT_REF);
        assert_eq!(event.full_name(), "");
    }

    #[test]
    fn test_repository_without_full_name() {
        let event = PushEvent::from_slice(br#"{"repository": {"id": 7}}"#).unwrap();
        assert_eq!(event.full_name(), "");
    }

    #[test]
    fn test_from_slice_rejects_malformed_json() {
        let err = PushEvent::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, RelayError::InvalidJson(_)));
    }

    #[test]
    fn test_from_slice_rejects_array() {
        let err = PushEvent::from_slice(br#"["refs/heads/dev"]"#).unwrap_err();
        assert!(matches!(err, RelayError::NotAnObject));
    }

    #[test]
    fn test_from_slice_rejects_null_fields() {
        for body in [
            r#"{"ref": null}"#,
            r#"{"ref": "refs/heads/dev", "repository": null}"#,
            r#"{"repository": {"full_name": null}}"#,
        ] {
            let err = PushEvent::from_slice(body.as_bytes()).unwrap_err();
            assert!(matches!(err, RelayError::InvalidJson(_)), "{body}");
            assert!(err.to_string().contains("null"), "{body}: {err}");
        }
    }

    #[test]
    fn test_from_slice_rejects_non_string_ref() {
        let err = PushEvent::from_slice(br#"{"ref": 12}"#).unwrap_err();
        assert!(matches!(err, RelayError::InvalidJson(_)));
    }
}
