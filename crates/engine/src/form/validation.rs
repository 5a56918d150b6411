//! Field validation and the textarea character counter.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dom::{Fragment, NodeId, PageDom};

pub const VALID_CLASS: &str = "is-valid";
pub const INVALID_CLASS: &str = "is-invalid";
pub const CHAR_COUNT_CLASS: &str = "char-count";

/// Character limit assumed for textareas without `maxlength`.
pub const DEFAULT_TEXTAREA_MAX_LENGTH: usize = 1000;

const COUNT_COLOR_CRITICAL: &str = "#dc3545";
const COUNT_COLOR_WARNING: &str = "#ffc107";
const COUNT_COLOR_NORMAL: &str = "#6c757d";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Input types that never take part in validation.
const SKIPPED_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "hidden"];

/// Constraints read from a form control's attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    pub required: bool,
    pub email: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldRules {
    /// Read constraints from the element. Unparsable length limits are ignored.
    pub fn from_element<D: PageDom + ?Sized>(dom: &D, field: NodeId) -> Self {
        let length = |name: &str| dom.attribute(field, name).and_then(|raw| raw.trim().parse::<usize>().ok());
        Self {
            required: dom.has_attribute(field, "required"),
            email: dom
                .attribute(field, "type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("email")),
            min_length: length("minlength"),
            max_length: length("maxlength"),
        }
    }

    /// Evaluate the rules against an already trimmed value.
    ///
    /// Only the first applicable rule decides, in this order: required,
    /// email format, minimum length, maximum length.
    pub fn check(&self, value: &str) -> bool {
        let length = value.chars().count();
        if self.required && value.is_empty() {
            false
        } else if self.email && !value.is_empty() {
            EMAIL_PATTERN.is_match(value)
        } else if let Some(min) = self.min_length.filter(|_| length > 0) {
            length >= min
        } else if let Some(max) = self.max_length.filter(|_| length > 0) {
            length <= max
        } else {
            true
        }
    }
}

/// Validate one field and update its validity classes.
///
/// Invalid fields get `is-invalid` (an empty required field included), valid
/// non-empty fields get `is-valid`, and valid empty optional fields get
/// neither. Textareas also refresh their character counter.
pub fn validate_field<D: PageDom + ?Sized>(dom: &mut D, field: NodeId) -> bool {
    let value = dom.field_value(field);
    let value = value.trim();
    let valid = FieldRules::from_element(dom, field).check(value);

    dom.remove_class(field, VALID_CLASS);
    dom.remove_class(field, INVALID_CLASS);
    if !valid {
        dom.add_class(field, INVALID_CLASS);
    } else if !value.is_empty() {
        dom.add_class(field, VALID_CLASS);
    }

    if dom.tag_name(field) == Some("textarea") {
        update_character_count(dom, field);
    }
    valid
}

/// Re-validate on input, but only fields already marked invalid.
pub fn revalidate_on_input<D: PageDom + ?Sized>(dom: &mut D, field: NodeId) -> Option<bool> {
    if !dom.has_class(field, INVALID_CLASS) {
        return None;
    }
    Some(validate_field(dom, field))
}

/// Inputs and textareas inside `form` that take part in validation.
pub fn form_fields<D: PageDom + ?Sized>(dom: &D, form: NodeId) -> Vec<NodeId> {
    dom.descendants(form)
        .into_iter()
        .filter(|node| match dom.tag_name(*node) {
            Some("textarea") => true,
            Some("input") => !dom
                .attribute(*node, "type")
                .is_some_and(|kind| SKIPPED_INPUT_TYPES.iter().any(|skipped| kind.eq_ignore_ascii_case(skipped))),
            _ => false,
        })
        .collect()
}

/// Validate every field of `form`. All fields are visited so each one gets
/// its classes updated; the result is their conjunction.
pub fn validate_form<D: PageDom + ?Sized>(dom: &mut D, form: NodeId) -> bool {
    let mut valid = true;
    for field in form_fields(dom, form) {
        valid &= validate_field(dom, field);
    }
    debug!(valid, "form validated");
    valid
}

/// Refresh the `<len>/<max> characters` counter next to a textarea.
pub fn update_character_count<D: PageDom + ?Sized>(dom: &mut D, textarea: NodeId) {
    let max_length = dom
        .attribute(textarea, "maxlength")
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|max| *max > 0)
        .unwrap_or(DEFAULT_TEXTAREA_MAX_LENGTH);
    let length = dom.field_value(textarea).chars().count();
    let remaining = max_length as i64 - length as i64;

    let Some(container) = dom.parent(textarea) else {
        return;
    };
    let existing = dom
        .descendants(container)
        .into_iter()
        .find(|node| dom.has_class(*node, CHAR_COUNT_CLASS));
    let counter = match existing {
        Some(counter) => counter,
        None => {
            let fragment = Fragment::new("small").class("form-text text-muted").class(CHAR_COUNT_CLASS);
            dom.append_fragment(container, &fragment)
        }
    };

    dom.set_text_content(counter, &format!("{length}/{max_length} characters"));
    dom.set_style_property(counter, "color", count_color(remaining));
}

fn count_color(remaining: i64) -> &'static str {
    if remaining < 50 {
        COUNT_COLOR_CRITICAL
    } else if remaining < 100 {
        COUNT_COLOR_WARNING
    } else {
        COUNT_COLOR_NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, parse_page};

    fn field(markup: &str) -> (DomTree, NodeId) {
        let dom = parse_page(&format!("<form id=\"f\"><div class=\"mb-3\">{markup}</div></form>"));
        let form = dom.element_by_id("f").unwrap();
        let node = form_fields(&dom, form)[0];
        (dom, node)
    }

    #[test]
    fn rules_apply_in_order() {
        let rules = FieldRules {
            required: true,
            email: true,
            min_length: Some(50),
            max_length: None,
        };
        assert!(!rules.check(""));
        assert!(rules.check("a@b.co"));
        assert!(!rules.check("a@b"));

        let rules = FieldRules {
            min_length: Some(2),
            max_length: Some(4),
            ..FieldRules::default()
        };
        assert!(rules.check(""));
        assert!(!rules.check("a"));
        assert!(rules.check("abcdef"));
    }

    #[test]
    fn empty_required_field_is_marked_invalid() {
        let (mut dom, node) = field(r#"<input name="name" required value="   ">"#);
        assert!(!validate_field(&mut dom, node));
        assert!(dom.has_class(node, INVALID_CLASS));
        assert!(!dom.has_class(node, VALID_CLASS));
    }

    #[test]
    fn email_field_switches_classes() {
        let (mut dom, node) = field(r#"<input type="email" name="email" required value="a@b">"#);
        assert!(!validate_field(&mut dom, node));
        assert!(dom.has_class(node, INVALID_CLASS));

        dom.set_field_value(node, "rahim@example.com");
        assert_eq!(revalidate_on_input(&mut dom, node), Some(true));
        assert!(dom.has_class(node, VALID_CLASS));
        assert!(!dom.has_class(node, INVALID_CLASS));
        assert_eq!(revalidate_on_input(&mut dom, node), None);
    }

    #[test]
    fn optional_empty_field_gets_no_class() {
        let (mut dom, node) = field(r#"<input name="phone" minlength="7">"#);
        assert!(validate_field(&mut dom, node));
        assert_eq!(dom.attribute(node, "class").unwrap_or_default(), "");
    }

    #[test]
    fn character_counter_tracks_length_and_colour() {
        let (mut dom, node) = field(r#"<textarea name="message" maxlength="120"></textarea>"#);
        dom.set_field_value(node, &"x".repeat(10));
        update_character_count(&mut dom, node);

        let counter = dom.elements_by_class(CHAR_COUNT_CLASS);
        assert_eq!(counter.len(), 1);
        assert_eq!(dom.text_content(counter[0]), "10/120 characters");
        assert_eq!(dom.style_property(counter[0], "color").as_deref(), Some("#6c757d"));

        dom.set_field_value(node, &"x".repeat(30));
        update_character_count(&mut dom, node);
        assert_eq!(dom.elements_by_class(CHAR_COUNT_CLASS), counter);
        assert_eq!(dom.style_property(counter[0], "color").as_deref(), Some("#ffc107"));

        dom.set_field_value(node, &"x".repeat(80));
        update_character_count(&mut dom, node);
        assert_eq!(dom.text_content(counter[0]), "80/120 characters");
        assert_eq!(dom.style_property(counter[0], "color").as_deref(), Some("#dc3545"));
    }

    #[test]
    fn input_on_a_field_not_marked_invalid_leaves_counter_alone() {
        let (mut dom, node) = field(r#"<textarea name="message" maxlength="120"></textarea>"#);
        dom.set_field_value(node, "hello there");

        assert_eq!(revalidate_on_input(&mut dom, node), None);
        assert!(dom.elements_by_class(CHAR_COUNT_CLASS).is_empty());

        validate_field(&mut dom, node);
        let counter = dom.elements_by_class(CHAR_COUNT_CLASS);
        assert_eq!(dom.text_content(counter[0]), "11/120 characters");
    }

    #[test]
    fn submit_inputs_are_not_fields() {
        let dom = parse_page(r#"<form id="f"><input name="name"><input type="submit" value="Send"><textarea name="message"></textarea></form>"#);
        let form = dom.element_by_id("f").unwrap();
        assert_eq!(form_fields(&dom, form).len(), 2);
    }
}
