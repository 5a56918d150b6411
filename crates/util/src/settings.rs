//! Host settings for sitebind.
//!
//! Settings live in a small JSON file in the platform configuration
//! directory (`~/.config/sitebind/settings.json` on most platforms). The file
//! is optional: a missing file yields defaults, and an unparsable file is
//! logged and ignored. Individual values can be overridden from the
//! environment, and document-level `config.emailService` overrides take
//! precedence over both at submission time.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "SITEBIND_SETTINGS_PATH";

/// Environment variable overriding the content document source.
pub const CONTENT_SOURCE_ENV: &str = "SITEBIND_CONTENT";

/// Environment variable overriding the email service endpoint.
pub const EMAIL_ENDPOINT_ENV: &str = "SITEBIND_EMAIL_ENDPOINT";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Content document location used when nothing else is configured.
pub const DEFAULT_CONTENT_SOURCE: &str = "data.json";

/// Email service endpoint used when neither settings nor the document override it.
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://email-service-e5iq.onrender.com/api/v1/send-email";

/// Recipient used when neither settings nor the document override it.
pub const DEFAULT_RECIPIENT_EMAIL: &str = "contact@eshaaz.example";

/// Error surfaced when reading settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    /// URL or file path of the content document.
    pub content_source: String,
    pub email_endpoint: String,
    pub recipient_email: String,
    /// Timeout applied to every outbound HTTP request.
    pub request_timeout_secs: u64,
    /// Trailing-edge delay for scroll evaluation.
    pub scroll_debounce_ms: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            content_source: DEFAULT_CONTENT_SOURCE.to_string(),
            email_endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
            recipient_email: DEFAULT_RECIPIENT_EMAIL.to_string(),
            request_timeout_secs: 30,
            scroll_debounce_ms: 10,
        }
    }
}

impl SiteSettings {
    /// Load settings from the default path and apply environment overrides.
    pub fn load() -> Result<Self, SettingsError> {
        let path = default_settings_path();
        Ok(Self::load_from(&path)?.with_env_overrides())
    }

    /// Load settings from an explicit path without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => {
                    debug!(path = %path.display(), "loaded settings");
                    Ok(settings)
                }
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse settings file; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(SettingsError::Io(error)),
        }
    }

    /// Apply `SITEBIND_CONTENT` and `SITEBIND_EMAIL_ENDPOINT` when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(source) = non_empty_env(CONTENT_SOURCE_ENV) {
            self.content_source = source;
        }
        if let Some(endpoint) = non_empty_env(EMAIL_ENDPOINT_ENV) {
            self.email_endpoint = endpoint;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }
}

/// Settings file path, honouring `SITEBIND_SETTINGS_PATH`.
pub fn default_settings_path() -> PathBuf {
    if let Some(path) = non_empty_env(SETTINGS_PATH_ENV) {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitebind")
        .join(SETTINGS_FILE_NAME)
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SiteSettings::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, SiteSettings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{"contentSource": "https://shop.example.com/data.json", "requestTimeoutSecs": 5}"#).unwrap();

        let settings = SiteSettings::load_from(&path).unwrap();
        assert_eq!(settings.content_source, "https://shop.example.com/data.json");
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.email_endpoint, DEFAULT_EMAIL_ENDPOINT);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SiteSettings::load_from(&path).unwrap(), SiteSettings::default());
    }

    #[test]
    fn environment_overrides_apply_to_loaded_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"recipientEmail": "owner@example.com"}"#).unwrap();
        let path_text = path.to_string_lossy().to_string();

        temp_env::with_vars(
            [
                (SETTINGS_PATH_ENV, Some(path_text.as_str())),
                (CONTENT_SOURCE_ENV, Some("site/data.json")),
                (EMAIL_ENDPOINT_ENV, Some("   ")),
            ],
            || {
                let settings = SiteSettings::load().unwrap();
                assert_eq!(settings.recipient_email, "owner@example.com");
                assert_eq!(settings.content_source, "site/data.json");
                assert_eq!(settings.email_endpoint, DEFAULT_EMAIL_ENDPOINT);
            },
        );
    }
}
