//! Error body shape for non-2xx responses.
//!
//! The server answers failures with `{"message": "..."}`. Clients derive a
//! human-readable message from whatever body they receive with
//! [`extract_error_message`].

use serde::{Deserialize, Serialize};

/// Message used when a failed response carries nothing readable.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unable to parse error response";

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub message: String,
}

impl ErrorBody {
    /// Creates an error body with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Derives the message text of a failed response.
///
/// JSON bodies yield their `message` field, or the JSON text when there is
/// none. Other bodies yield their raw text. Empty or unparseable bodies
/// yield [`FALLBACK_ERROR_MESSAGE`].
#[must_use]
pub fn extract_error_message(content_type: Option<&str>, body: &str) -> String {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        return match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => match value.get("message").and_then(serde_json::Value::as_str) {
                Some(message) if !message.is_empty() => message.to_string(),
                _ => value.to_string(),
            },
            Err(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        };
    }

    let text = body.trim();
    if text.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_message_field_wins() {
        let body = r#"{"message":"task 4 not found"}"#;
        assert_eq!(
            extract_error_message(Some("application/json"), body),
            "task 4 not found"
        );
    }

    #[test]
    fn json_charset_suffix_is_still_json() {
        let body = r#"{"message":"bad title"}"#;
        assert_eq!(
            extract_error_message(Some("application/json; charset=utf-8"), body),
            "bad title"
        );
    }

    #[test]
    fn json_without_message_returns_json_text() {
        let body = r#"{"error":"nope"}"#;
        assert_eq!(
            extract_error_message(Some("application/json"), body),
            r#"{"error":"nope"}"#
        );
    }

    #[test]
    fn malformed_json_falls_back() {
        assert_eq!(
            extract_error_message(Some("application/json"), "{not json"),
            FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn plain_text_is_returned_raw() {
        assert_eq!(
            extract_error_message(Some("text/plain"), "Service Unavailable\n"),
            "Service Unavailable"
        );
        assert_eq!(extract_error_message(None, "gateway down"), "gateway down");
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(extract_error_message(None, ""), FALLBACK_ERROR_MESSAGE);
        assert_eq!(
            extract_error_message(Some("text/html"), "  "),
            FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn error_body_serializes_as_message_object() {
        let json = serde_json::to_string(&ErrorBody::new("boom")).unwrap();
        assert_eq!(json, r#"{"message":"boom"}"#);
    }
}
