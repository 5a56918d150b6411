//! # Content Document
//!
//! The loaded JSON document that drives page text, media and links. It is
//! produced once by the loader and then shared read-only with every consumer
//! (binder, contact settings, diagnostics).
//!
//! ## Path lookup
//!
//! Bind paths are dot separated (`site.navigation`, `about.content.0`). Lookup
//! descends object keys by name and array elements by numeric index, and
//! treats a missing key or a `null` anywhere along the way as absent.
//!
//! ```rust
//! use sitebind_types::ContentDocument;
//! use serde_json::json;
//!
//! let doc = ContentDocument::from_value(json!({
//!     "site": { "title": "Eshaaz", "tagline": null },
//!     "about": { "content": ["First", "Second"] }
//! }))?;
//!
//! assert_eq!(doc.lookup_text("site.title").as_deref(), Some("Eshaaz"));
//! assert_eq!(doc.lookup_text("about.content.1").as_deref(), Some("Second"));
//! assert!(doc.lookup("site.tagline").is_none());
//! assert!(doc.lookup("site.missing.deeper").is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::model::{EmailServiceConfig, Feature, FooterLink, NavItem, Product, SocialMedia};

/// Currency symbol used for product prices when the document has no `currency`.
pub const DEFAULT_CURRENCY: &str = "৳";

/// Immutable, parsed content document. The root is always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    root: Value,
}

impl ContentDocument {
    /// Wrap a parsed JSON value, rejecting roots that are not objects.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Object(_) => Ok(Self { root: value }),
            other => Err(LoadError::Shape {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let value = serde_json::from_str::<Value>(text).map_err(|error| LoadError::parse(error.to_string()))?;
        Self::from_value(value)
    }

    /// The underlying JSON tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Sorted top-level section names.
    pub fn sections(&self) -> Vec<&str> {
        let mut keys = self
            .root
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Resolve a dot path to a non-null value.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        resolve_path(&self.root, path)
    }

    /// Resolve a dot path to the display text of a scalar value.
    ///
    /// Arrays and objects have no scalar representation and resolve to `None`.
    pub fn lookup_text(&self, path: &str) -> Option<String> {
        self.lookup(path).and_then(display_text)
    }

    /// Resolve a dot path to an array and deserialize each element.
    ///
    /// Elements that do not deserialize into `T` are skipped.
    pub fn list_at<T: DeserializeOwned>(&self, path: &str) -> Option<Vec<T>> {
        let items = self.lookup(path)?.as_array()?;
        let records = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item.clone()) {
                Ok(record) if item.is_object() => Some(record),
                Ok(_) => {
                    debug!(path, index, "skipping non-object list entry");
                    None
                }
                Err(error) => {
                    debug!(path, index, %error, "skipping malformed list entry");
                    None
                }
            })
            .collect();
        Some(records)
    }

    /// `site.navigation` entries.
    pub fn navigation(&self) -> Option<Vec<NavItem>> {
        self.list_at("site.navigation")
    }

    /// `collection.products` entries.
    pub fn products(&self) -> Option<Vec<Product>> {
        self.list_at("collection.products")
    }

    /// `features.items` entries.
    pub fn features(&self) -> Option<Vec<Feature>> {
        self.list_at("features.items")
    }

    /// `footer.links` entries.
    pub fn footer_links(&self) -> Option<Vec<FooterLink>> {
        self.list_at("footer.links")
    }

    /// `about.content` paragraphs. Non-scalar entries are skipped.
    pub fn about_paragraphs(&self) -> Option<Vec<String>> {
        let items = self.lookup("about.content")?.as_array()?;
        Some(items.iter().filter_map(display_text).collect())
    }

    /// `site.socialMedia` block, when it is an object.
    pub fn social_media(&self) -> Option<SocialMedia> {
        let value = self.lookup("site.socialMedia")?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Currency symbol for product prices.
    pub fn currency(&self) -> &str {
        self.lookup("currency")
            .and_then(Value::as_str)
            .filter(|currency| !currency.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    /// `config.emailService` overrides. Missing or malformed blocks yield no overrides.
    pub fn email_service(&self) -> EmailServiceConfig {
        self.lookup("config.emailService")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }
}

/// Resolve a dot path against any JSON value.
///
/// Returns `None` when the path is empty, a segment is missing, an array
/// index is out of range or not numeric, or the final value is `null`.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Display text for a scalar JSON value.
///
/// Integral floats render without a fractional part (`100.0` → `100`).
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => {
            if number.is_f64()
                && let Some(float) = number.as_f64()
                && float.fract() == 0.0
                && float.abs() < 1e15
            {
                return Some(format!("{}", float as i64));
            }
            Some(number.to_string())
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Short name of a JSON value's kind, for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
