//! Sitebind HTTP client.
//!
//! This crate provides the one HTTP client used by the page runtime. It
//! focuses on:
//!
//! - Constructing an HTTP client with sensible defaults (timeout, User-Agent)
//! - Loading the content document from a URL or a local file
//! - Posting contact messages to the email service
//! - Validating email endpoints before personal data is sent to them
//!
//! # Example
//!
//! ```ignore
//! use sitebind_api::{ContentSource, SiteClient};
//! use sitebind_util::SiteSettings;
//!
//! async fn run() -> anyhow::Result<()> {
//!     let settings = SiteSettings::load()?;
//!     let client = SiteClient::new(&settings)?;
//!     let source = ContentSource::parse(&settings.content_source)?;
//!     let document = client.load_content(&source).await?;
//!     println!("sections: {:?}", document.sections());
//!     Ok(())
//! }
//! ```

use std::env;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Method, RequestBuilder, Url, header};
use sitebind_util::SiteSettings;
use tracing::debug;

pub mod content;
pub mod email;

pub use content::ContentSource;

/// Hostnames allowed to use plain HTTP for the email endpoint.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Thin wrapper around a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct SiteClient {
    pub http: Client,
    pub user_agent: String,
}

impl SiteClient {
    /// Build a client using the timeout from `settings`.
    pub fn new(settings: &SiteSettings) -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(settings.request_timeout())
            .build()
            .context("build http client")?;

        Ok(Self {
            http,
            user_agent: format!("sitebind/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a request carrying the configured User-Agent.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }
}

/// Validate that an email endpoint is acceptable before posting to it.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn validate_endpoint_url(endpoint: &str) -> Result<Url> {
    let parsed = Url::parse(endpoint).map_err(|e| anyhow!("invalid URL '{}': {}", endpoint, e))?;

    let host_name = parsed.host_str().ok_or_else(|| anyhow!("endpoint must include a host"))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(parsed);
    }

    if parsed.scheme() != "https" {
        return Err(anyhow!(
            "endpoint must use https for non-localhost hosts; got '{}://'",
            parsed.scheme()
        ));
    }

    Ok(parsed)
}
