//! Utility helpers shared by the sitebind crates: response parsing, display
//! formatting, settings, debouncing and log redaction.

pub mod debounce;
pub mod formatting;
pub mod response;
pub mod settings;

pub use debounce::Debouncer;
pub use formatting::{format_price, format_submission_timestamp, price_label};
pub use response::{JsonParseError, parse_response_json_strict, service_error_message};
pub use settings::{SettingsError, SiteSettings};

use once_cell::sync::Lazy;
use regex::Regex;

static REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)(authorization: )([\w\-\.=:/+]+)", "${1}<redacted>"),
        (r"(?i)([?&](?:key|token|secret|api_key)=)([^&\s]+)", "${1}<redacted>"),
        (r"([\w.+-])[\w.+-]*(@[\w-]+(?:\.[\w-]+)+)", "${1}<redacted>${2}"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|regex| (regex, replacement)))
    .collect()
});

/// Redacts values that should not appear in logs or dry-run output:
/// authorization headers, credential query parameters and the local part of
/// email addresses (only the first character is kept).
///
/// ```rust
/// use sitebind_util::redact_sensitive;
///
/// assert_eq!(redact_sensitive("to shop.owner@example.com"), "to s<redacted>@example.com");
/// assert_eq!(redact_sensitive("https://x.test/send?token=abc123"), "https://x.test/send?token=<redacted>");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, *replacement).into_owned();
    }
    redacted
}
