//! Error types surfaced by content loading and contact submission.

use thiserror::Error;

/// Failure to obtain a usable content document.
///
/// The page initializer logs this and skips hydration; navigation, scroll
/// and form wiring still run against the authored fallback markup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("content request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("content request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("content document is not valid JSON: {message}")]
    Parse { message: String },

    #[error("content document root must be a JSON object, found {found}")]
    Shape { found: &'static str },

    #[error("failed to read content file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content source '{source_text}': {reason}")]
    InvalidSource { source_text: String, reason: String },
}

impl LoadError {
    /// Create a network error.
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a non-success status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status { url: url.into(), status }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }
}

/// Failure to deliver a contact form message.
///
/// Surfaced to the visitor as a transient error notice; the form keeps its
/// values so the submission can be retried.
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    #[error("email service request failed: {message}")]
    Network { message: String },

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("invalid email endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl SubmissionError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Create a rejection error from an HTTP status and optional service message.
    ///
    /// Falls back to `Server error: <status>` when the service did not
    /// provide an `error` field.
    pub fn rejected(status: u16, service_message: Option<String>) -> Self {
        let message = service_message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Server error: {status}"));
        Self::Rejected { status, message }
    }

    /// Create an endpoint validation error.
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_falls_back_to_status_message() {
        let error = SubmissionError::rejected(502, None);
        assert_eq!(error.to_string(), "Server error: 502");

        let error = SubmissionError::rejected(400, Some("recipient missing".into()));
        assert_eq!(error.to_string(), "recipient missing");
    }

    #[test]
    fn status_error_mentions_url() {
        let error = LoadError::status("https://shop.example.com/data.json", 404);
        assert_eq!(error.to_string(), "content request to https://shop.example.com/data.json returned HTTP 404");
    }
}
