//! Content document loading.
//!
//! The loader runs once per page view. A failure is returned to the caller
//! untouched so the initializer can skip hydration while still wiring the
//! rest of the page.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::{Method, Url};
use sitebind_types::{ContentDocument, LoadError};
use sitebind_util::parse_response_json_strict;
use tracing::{debug, info};

use crate::SiteClient;

/// Where the content document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Url(Url),
    File(PathBuf),
}

impl ContentSource {
    /// Interpret `text` as an `http(s)` URL, or otherwise as a file path.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LoadError::InvalidSource {
                source_text: text.to_string(),
                reason: "source is empty".into(),
            });
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Url::parse(trimmed).map(Self::Url).map_err(|error| LoadError::InvalidSource {
                source_text: trimmed.to_string(),
                reason: error.to_string(),
            });
        }
        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl SiteClient {
    /// Load and parse the content document.
    ///
    /// # Errors
    /// - [`LoadError::Network`] when the request cannot be completed
    /// - [`LoadError::Status`] for a non-2xx response
    /// - [`LoadError::Io`] when a file source cannot be read
    /// - [`LoadError::Parse`] when the body is not JSON
    /// - [`LoadError::Shape`] when the root is not an object
    pub async fn load_content(&self, source: &ContentSource) -> Result<ContentDocument, LoadError> {
        let document = match source {
            ContentSource::Url(url) => self.fetch_content(url).await?,
            ContentSource::File(path) => read_content_file(path).await?,
        };
        info!(source = %source, sections = document.sections().len(), "content document loaded");
        Ok(document)
    }

    async fn fetch_content(&self, url: &Url) -> Result<ContentDocument, LoadError> {
        debug!(%url, "fetching content document");
        let response = self
            .request(Method::GET, url.clone())
            .send()
            .await
            .map_err(|error| LoadError::network(url.as_str(), error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::status(url.as_str(), status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|error| LoadError::network(url.as_str(), error.to_string()))?;
        let value = parse_response_json_strict(&text, Some(status)).map_err(|error| LoadError::parse(error.to_string()))?;
        ContentDocument::from_value(value)
    }
}

async fn read_content_file(path: &Path) -> Result<ContentDocument, LoadError> {
    debug!(path = %path.display(), "reading content document");
    let text = tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value = parse_response_json_strict(&text, None).map_err(|error| LoadError::parse(error.to_string()))?;
    ContentDocument::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_paths() {
        let source = ContentSource::parse("https://shop.example.com/data.json").unwrap();
        assert!(matches!(source, ContentSource::Url(ref url) if url.path() == "/data.json"));

        let source = ContentSource::parse(" site/data.json ").unwrap();
        assert_eq!(source, ContentSource::File(PathBuf::from("site/data.json")));
        assert_eq!(source.to_string(), "site/data.json");
    }

    #[test]
    fn rejects_empty_and_malformed_sources() {
        assert!(matches!(ContentSource::parse("  "), Err(LoadError::InvalidSource { .. })));
        assert!(matches!(ContentSource::parse("https://"), Err(LoadError::InvalidSource { .. })));
    }
}
