//! Error types for the atlas-link client.
//!
//! Upstream HTTP statuses surface verbatim as typed errors; the client
//! performs no recovery beyond the transient-network retry in the
//! executors.

use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for atlas-link operations
pub type Result<T> = std::result::Result<T, AtlasLinkError>;

/// Errors returned by the Atlas API client.
#[derive(Error, Debug)]
pub enum AtlasLinkError {
    /// The request was malformed (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The API token was missing or rejected (HTTP 401)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The resource does not exist, or its media is not available (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The upstream rejected the payload (HTTP 422), with field-level details
    #[error("Validation failed: {message}")]
    ValidationError {
        message: String,
        /// Field name to list of error messages, as reported by the upstream
        errors: HashMap<String, Vec<String>>,
    },

    /// The account's request quota was exhausted (HTTP 429)
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        /// Seconds from the `Retry-After` header, surfaced verbatim
        retry_after: Option<u64>,
    },

    /// The upstream cancelled a query that exceeded its statement cap
    #[error("Query timeout: {0}")]
    TimeoutError(String),

    /// Any other non-success HTTP status
    #[error("Server error ({status_code}): {message}")]
    ServerError { status_code: u16, message: String },

    /// Transport-level failure (DNS, connect, read)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The client was misconfigured
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<reqwest::Error> for AtlasLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::SerializationError(err.to_string())
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AtlasLinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl AtlasLinkError {
    /// Map a non-success response to a typed error.
    ///
    /// `retry_after` carries the parsed `Retry-After` header when present.
    /// Statement-cap timeouts arrive as error bodies rather than a
    /// distinctive status, so the message is inspected for them on every
    /// status except 401/404/429.
    pub(crate) fn from_response(status: StatusCode, retry_after: Option<u64>, body: &str) -> Self {
        let message = extract_message(body);

        match status.as_u16() {
            401 => Self::AuthenticationError(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited {
                message,
                retry_after,
            },
            _ if is_timeout_message(&message) => Self::TimeoutError(message),
            400 => Self::BadRequest(message),
            422 => Self::ValidationError {
                message,
                errors: validation_errors(body),
            },
            code => Self::ServerError {
                status_code: code,
                message,
            },
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The upstream wraps messages a few different ways depending on the
/// endpoint: `{"error": {"message": ...}}`, `{"message": ...}`, or a bare
/// `{"error": "..."}`. Falls back to the (truncated) raw body.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return msg.to_string();
        }
        if let Some(msg) = value.get("message").and_then(Value::as_str) {
            return msg.to_string();
        }
        if let Some(msg) = value.get("error").and_then(Value::as_str) {
            return msg.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    let mut message: String = trimmed.chars().take(200).collect();
    if message.len() < trimmed.len() {
        message.push_str("...");
    }
    message
}

/// Parse field-level validation errors from a 422 body.
///
/// Bodies look like `{"form": {"errors": {"name": ["can't be blank"]}}}`,
/// or sometimes carry `errors` at the top level.
fn validation_errors(body: &str) -> HashMap<String, Vec<String>> {
    let mut out = HashMap::new();

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return out;
    };

    let errors = value.get("errors").or_else(|| {
        value
            .as_object()
            .and_then(|obj| obj.values().find_map(|v| v.get("errors")))
    });

    if let Some(Value::Object(map)) = errors {
        for (field, messages) in map {
            let collected = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                Value::String(single) => vec![single.clone()],
                other => vec![other.to_string()],
            };
            out.insert(field.clone(), collected);
        }
    }

    out
}

fn is_timeout_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("statement timeout")
        || lower.contains("canceling statement")
        || lower.contains("query timeout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = AtlasLinkError::from_response(StatusCode::UNAUTHORIZED, None, "{}");
        assert!(matches!(err, AtlasLinkError::AuthenticationError(_)));

        let err = AtlasLinkError::from_response(StatusCode::NOT_FOUND, None, "");
        assert!(matches!(err, AtlasLinkError::NotFound(_)));

        let err = AtlasLinkError::from_response(StatusCode::BAD_REQUEST, None, "");
        assert!(matches!(err, AtlasLinkError::BadRequest(_)));

        let err = AtlasLinkError::from_response(StatusCode::INTERNAL_SERVER_ERROR, None, "");
        assert!(matches!(
            err,
            AtlasLinkError::ServerError {
                status_code: 500,
                ..
            }
        ));
    }

    #[test]
    fn test_message_extraction() {
        let err = AtlasLinkError::from_response(
            StatusCode::UNAUTHORIZED,
            None,
            r#"{"error": {"message": "invalid token"}}"#,
        );
        match err {
            AtlasLinkError::AuthenticationError(msg) => assert_eq!(msg, "invalid token"),
            other => panic!("unexpected error: {:?}", other),
        }

        let err =
            AtlasLinkError::from_response(StatusCode::NOT_FOUND, None, r#"{"message": "gone"}"#);
        match err {
            AtlasLinkError::NotFound(msg) => assert_eq!(msg, "gone"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors_nested_envelope() {
        let body = r#"{"form": {"errors": {"name": ["can't be blank"], "elements": ["required"]}}}"#;
        let err = AtlasLinkError::from_response(StatusCode::UNPROCESSABLE_ENTITY, None, body);

        match err {
            AtlasLinkError::ValidationError { errors, .. } => {
                assert_eq!(errors["name"], vec!["can't be blank"]);
                assert_eq!(errors["elements"], vec!["required"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors_top_level() {
        let body = r#"{"errors": {"form_id": "must be present"}}"#;
        let err = AtlasLinkError::from_response(StatusCode::UNPROCESSABLE_ENTITY, None, body);

        match err {
            AtlasLinkError::ValidationError { errors, .. } => {
                assert_eq!(errors["form_id"], vec!["must be present"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rate_limited_carries_retry_after() {
        let err = AtlasLinkError::from_response(StatusCode::TOO_MANY_REQUESTS, Some(30), "slow down");
        match err {
            AtlasLinkError::RateLimited { retry_after, .. } => {
                assert_eq!(retry_after, Some(30));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_query_cap_maps_to_timeout() {
        let body = r#"{"error": {"message": "canceling statement due to statement timeout"}}"#;
        let err = AtlasLinkError::from_response(StatusCode::UNPROCESSABLE_ENTITY, None, body);
        assert!(matches!(err, AtlasLinkError::TimeoutError(_)));
    }

    #[test]
    fn test_raw_body_fallback_truncates() {
        let long_body = "x".repeat(500);
        let err = AtlasLinkError::from_response(StatusCode::BAD_GATEWAY, None, &long_body);
        match err {
            AtlasLinkError::ServerError { message, .. } => {
                assert!(message.len() <= 203);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
