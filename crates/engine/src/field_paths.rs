//! Helpers for explaining unresolved bind paths.
//!
//! Used by the `check` command to turn a [`crate::BindReport`] into
//! actionable messages: where the path stopped resolving, which fields were
//! available there, and which scalar paths elsewhere in the document end in
//! the same key.

use serde_json::Value;
use sitebind_types::{ContentDocument, json_kind, resolve_path};

/// Missing-path diagnostic details for one bind path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MissingPathDetails {
    /// Path as written in the page.
    pub configured_path: String,
    /// Final path segment used for the leaf candidate search.
    pub leaf: String,
    /// Scalar paths in the document ending in `leaf`.
    pub nested_candidates: Vec<String>,
    /// Longest prefix of the path that resolved.
    pub resolved_prefix: String,
    /// Fields available under `resolved_prefix`.
    pub available_fields: Vec<String>,
    /// Kind of value found when the full path resolved to an array or object.
    pub non_scalar_kind: Option<&'static str>,
}

impl MissingPathDetails {
    /// Message naming the binding attribute and what went wrong.
    pub fn message(&self, attribute: &str) -> String {
        if let Some(kind) = self.non_scalar_kind {
            return format!(
                "{attribute} path '{}' resolves to an {kind}; only strings, numbers and booleans can be bound",
                self.configured_path
            );
        }
        match self.nested_candidates.as_slice() {
            [single] => format!("{attribute} path '{}' was not found; did you mean '{single}'?", self.configured_path),
            [] => format!("{attribute} path '{}' was not found in the content document", self.configured_path),
            candidates => format!(
                "{attribute} path '{}' was not found; nested '{}' candidates: {}",
                self.configured_path,
                self.leaf,
                candidates.join(", ")
            ),
        }
    }

    /// Suggested fix for the page author.
    pub fn suggested_next_step(&self) -> String {
        if self.non_scalar_kind.is_some() {
            return format!("Point the binding at a scalar field below '{}'.", self.configured_path);
        }
        if let [single] = self.nested_candidates.as_slice() {
            return format!("Change the binding to '{single}'.");
        }
        if self.nested_candidates.len() > 1 {
            return format!(
                "Change the binding to one of the candidate paths ({}).",
                self.nested_candidates.join(", ")
            );
        }
        if self.available_fields.is_empty() {
            return "Add the field to the content document or remove the binding.".to_string();
        }
        let location = if self.resolved_prefix.is_empty() {
            "the document root".to_string()
        } else {
            format!("'{}'", self.resolved_prefix)
        };
        format!("Fields available under {location}: {}.", self.available_fields.join(", "))
    }
}

/// Collect scalar leaf candidates from a JSON payload by leaf key name.
///
/// Returns tuples of `(path, value)` for every non-null scalar whose final
/// segment matches `leaf`. Array elements contribute their index as a segment.
pub fn nested_scalar_leaf_candidates_from_json(value: &Value, leaf: &str) -> Vec<(String, Value)> {
    let mut matches = Vec::new();
    collect_nested_scalar_leaf_candidates_from_json(value, "", leaf, &mut matches);
    matches
}

fn collect_nested_scalar_leaf_candidates_from_json(value: &Value, current_path: &str, leaf: &str, matches: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, nested_value) in map {
                let next_path = join_path(current_path, key);
                if key == leaf && is_bindable_json_value(nested_value) {
                    matches.push((next_path.clone(), nested_value.clone()));
                }
                collect_nested_scalar_leaf_candidates_from_json(nested_value, &next_path, leaf, matches);
            }
        }
        Value::Array(items) => {
            for (index, nested_value) in items.iter().enumerate() {
                let next_path = join_path(current_path, &index.to_string());
                collect_nested_scalar_leaf_candidates_from_json(nested_value, &next_path, leaf, matches);
            }
        }
        _ => {}
    }
}

/// Build missing-path details for `configured_path`.
pub fn missing_details(document: &ContentDocument, configured_path: &str, max_available_fields: usize) -> MissingPathDetails {
    let root = document.as_value();
    let leaf = configured_path.split('.').next_back().unwrap_or(configured_path).to_string();
    let non_scalar_kind = resolve_path(root, configured_path)
        .filter(|value| !is_bindable_json_value(value))
        .map(json_kind);
    let nested_candidates = nested_scalar_leaf_candidates_from_json(root, &leaf)
        .into_iter()
        .map(|(path, _)| path)
        .filter(|path| path != configured_path)
        .collect::<Vec<_>>();
    let (resolved_prefix, anchor) = deepest_resolved_prefix(root, configured_path);
    let mut available_fields = json_top_level_fields(anchor);
    available_fields.truncate(max_available_fields);

    MissingPathDetails {
        configured_path: configured_path.to_string(),
        leaf,
        nested_candidates,
        resolved_prefix,
        available_fields,
        non_scalar_kind,
    }
}

/// Longest prefix of `path` that resolves, with the value found there.
fn deepest_resolved_prefix<'a>(root: &'a Value, path: &str) -> (String, &'a Value) {
    let mut prefix = String::new();
    let mut anchor = root;
    for segment in path.split('.') {
        let candidate = join_path(&prefix, segment);
        match resolve_path(root, &candidate) {
            Some(value) => {
                prefix = candidate;
                anchor = value;
            }
            None => break,
        }
    }
    (prefix, anchor)
}

/// Returns sorted field names of an object, or index labels of an array.
pub fn json_top_level_fields(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => {
            let mut fields = map.keys().cloned().collect::<Vec<_>>();
            fields.sort();
            fields
        }
        Value::Array(items) => (0..items.len()).map(|index| index.to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Returns true for values the binder can write: strings, numbers and booleans.
pub fn is_bindable_json_value(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> ContentDocument {
        ContentDocument::from_value(json!({
            "site": { "brand": { "name": "Eshaaz" }, "tagline": "Handmade" },
            "collection": { "products": [ { "name": "Saree" }, { "name": "Scarf" } ] },
            "hero": { "image": null }
        }))
        .unwrap()
    }

    #[test]
    fn collects_nested_leaf_candidates_through_arrays() {
        let doc = document();
        let paths = nested_scalar_leaf_candidates_from_json(doc.as_value(), "name")
            .into_iter()
            .map(|(path, _)| path)
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec!["collection.products.0.name", "collection.products.1.name", "site.brand.name"]
        );
    }

    #[test]
    fn suggests_single_candidate() {
        let doc = document();
        let details = missing_details(&doc, "site.brand.title", 10);
        assert!(details.nested_candidates.is_empty());
        assert_eq!(details.resolved_prefix, "site.brand");
        assert_eq!(details.available_fields, vec!["name"]);
        assert_eq!(details.suggested_next_step(), "Fields available under 'site.brand': name.");

        let details = missing_details(&doc, "site.tag.tagline", 10);
        assert_eq!(
            details.message("data-content"),
            "data-content path 'site.tag.tagline' was not found; did you mean 'site.tagline'?"
        );
        assert_eq!(details.suggested_next_step(), "Change the binding to 'site.tagline'.");
    }

    #[test]
    fn suggests_brand_name_for_misplaced_site_name() {
        let doc = ContentDocument::from_value(json!({ "site": { "brand": { "name": "Eshaaz" } } })).unwrap();
        let details = missing_details(&doc, "site.name", 10);
        assert_eq!(details.nested_candidates, vec!["site.brand.name"]);
        assert_eq!(
            details.message("data-content"),
            "data-content path 'site.name' was not found; did you mean 'site.brand.name'?"
        );
    }

    #[test]
    fn reports_non_scalar_targets_and_null_values() {
        let doc = document();
        let details = missing_details(&doc, "collection.products", 10);
        assert_eq!(details.non_scalar_kind, Some("array"));
        assert!(details.message("data-content").contains("resolves to an array"));

        let details = missing_details(&doc, "hero.image", 10);
        assert_eq!(details.non_scalar_kind, None);
        assert_eq!(details.resolved_prefix, "hero");
        assert_eq!(
            details.message("data-src"),
            "data-src path 'hero.image' was not found in the content document"
        );
    }
}
