//! # Response Parsing
//!
//! Helpers for turning HTTP response bodies into JSON with useful errors and
//! for extracting the `error` field that the email service returns on failure.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Parse HTTP response text into JSON, providing detailed errors on failure.
///
/// Any parse error is decorated with the originating HTTP status and a
/// truncated, whitespace-collapsed preview of the body so that truncated or
/// HTML error pages are easy to recognise in logs.
///
/// # Example
/// ```rust
/// use sitebind_util::response::parse_response_json_strict;
///
/// let value = parse_response_json_strict(r#"{"site": {}}"#, None).unwrap();
/// assert!(value.get("site").is_some());
///
/// let error = parse_response_json_strict("<html>oops</html>", None).unwrap_err();
/// assert_eq!(error.body_preview(), "<html>oops</html>");
/// ```
pub fn parse_response_json_strict(text: &str, status: Option<StatusCode>) -> Result<Value, JsonParseError> {
    serde_json::from_str::<Value>(text).map_err(|error| {
        let status_note = status
            .map(|code| format!("status {code}"))
            .unwrap_or_else(|| "unknown status".to_string());
        let preview = truncate_response_preview(text, 200);

        JsonParseError::new(status_note, error, preview)
    })
}

/// Extract the service-provided `error` message from a failure body.
///
/// Returns `None` when the body is not JSON or carries no string `error`.
///
/// ```rust
/// use sitebind_util::response::service_error_message;
///
/// assert_eq!(service_error_message(r#"{"error":"quota exceeded"}"#).as_deref(), Some("quota exceeded"));
/// assert_eq!(service_error_message("Bad Gateway"), None);
/// ```
pub fn service_error_message(text: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(text).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

fn truncate_response_preview(text: &str, limit: usize) -> String {
    if text.trim().is_empty() {
        return "<empty>".to_string();
    }

    let mut preview = String::new();
    for ch in text.chars() {
        if preview.len() >= limit {
            preview.push_str("...");
            break;
        }
        match ch {
            '\n' | '\r' | '\t' => {
                if !preview.ends_with(' ') {
                    preview.push(' ');
                }
            }
            _ => preview.push(ch),
        }
    }

    preview.trim().to_string()
}

/// Error returned when strict JSON parsing of an HTTP response fails.
#[derive(Debug, Error)]
#[error("failed to parse JSON response ({status_note}): {source}. body preview: {body_preview}")]
pub struct JsonParseError {
    status_note: String,
    #[source]
    source: serde_json::Error,
    body_preview: String,
}

impl JsonParseError {
    pub fn new(status_note: String, source: serde_json::Error, body_preview: String) -> Self {
        Self {
            status_note,
            source,
            body_preview,
        }
    }

    /// Truncated response preview captured during parsing.
    pub fn body_preview(&self) -> &str {
        &self.body_preview
    }
}
