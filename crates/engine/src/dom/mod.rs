//! DOM port used by the page runtime.
//!
//! Every behaviour in this crate talks to the page through [`PageDom`]. The
//! browser host implements it over the live document; [`DomTree`] is the
//! in-memory implementation used by the CLI and the tests.

mod fragment;
mod html;
mod tree;

pub use fragment::{Fragment, FragmentNode};
pub use html::{outer_html, parse_page, read_page};
pub use tree::DomTree;

/// Handle to a node owned by a [`PageDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Operations the page runtime needs from a document.
///
/// Queries only return nodes attached to the document, in document order.
pub trait PageDom {
    /// Elements carrying `attribute`.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId>;

    /// Elements with the given tag name (lowercase).
    fn elements_by_tag(&self, tag: &str) -> Vec<NodeId>;

    /// First element whose `id` equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Element descendants of `node`, excluding `node` itself.
    fn descendants(&self, node: NodeId) -> Vec<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Lowercase tag name, `None` for non-element nodes.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self, node: NodeId) -> String;

    /// Replace all children of `node` with a single text node.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    fn document_title(&self) -> Option<&str>;

    fn set_document_title(&mut self, title: &str);

    /// Append a text node as the last child of `parent`.
    fn append_text(&mut self, parent: NodeId, text: &str);

    /// Drop every child of `node`.
    fn clear_children(&mut self, node: NodeId);

    /// Detach every child of `node` and return them in order. The returned
    /// subtrees stay valid and can be put back with [`PageDom::replace_children`].
    fn take_children(&mut self, node: NodeId) -> Vec<NodeId>;

    /// Replace the children of `node` with previously detached `children`.
    fn replace_children(&mut self, node: NodeId, children: &[NodeId]);

    /// Build `fragment` and append it as the last child of `parent`.
    fn append_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> NodeId;

    /// Detach `node` (and its subtree) from the document.
    fn remove_node(&mut self, node: NodeId);

    fn is_attached(&self, node: NodeId) -> bool;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|candidate| candidate == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let updated = match self.attribute(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &updated);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(existing) = self.attribute(node, "class") else {
            return;
        };
        let remaining = existing
            .split_ascii_whitespace()
            .filter(|candidate| *candidate != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &remaining);
    }

    /// Elements (document order) carrying `class`.
    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.elements_with_attribute("class")
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    /// First element whose `attribute` equals `value`.
    fn first_with_attribute_value(&self, attribute: &str, value: &str) -> Option<NodeId> {
        self.elements_with_attribute(attribute)
            .into_iter()
            .find(|node| self.attribute(*node, attribute) == Some(value))
    }

    /// Current value of a form control. Textareas hold their value as text.
    fn field_value(&self, node: NodeId) -> String {
        if self.tag_name(node) == Some("textarea") {
            return self.text_content(node);
        }
        self.attribute(node, "value").unwrap_or_default().to_string()
    }

    fn set_field_value(&mut self, node: NodeId, value: &str) {
        if self.tag_name(node) == Some("textarea") {
            self.set_text_content(node, value);
        } else {
            self.set_attribute(node, "value", value);
        }
    }

    /// Set one inline style property, keeping the others.
    fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) {
        let mut declarations = self
            .attribute(node, "style")
            .unwrap_or_default()
            .split(';')
            .filter_map(|declaration| {
                let (name, current) = declaration.split_once(':')?;
                let name = name.trim();
                (!name.is_empty() && name != property).then(|| format!("{name}: {}", current.trim()))
            })
            .collect::<Vec<_>>();
        declarations.push(format!("{property}: {value}"));
        self.set_attribute(node, "style", &declarations.join("; "));
    }

    /// Value of one inline style property.
    fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        self.attribute(node, "style")?.split(';').find_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            (name.trim() == property).then(|| value.trim().to_string())
        })
    }

    /// Nearest ancestor (excluding `node`) carrying `class`.
    fn closest_ancestor_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }
}
