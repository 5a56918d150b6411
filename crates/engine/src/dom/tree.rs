use indexmap::IndexMap;

use super::{Fragment, FragmentNode, NodeId, PageDom};

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element { tag: String, attributes: IndexMap<String, String> },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed in-memory document.
///
/// Removed nodes stay in the arena but are unreachable from the root, so
/// queries never return them and their `NodeId`s remain usable. Nothing is
/// reclaimed: every list regeneration, notice and text replacement grows the
/// arena. That suits one-shot hydration; a long-lived page that rebinds
/// repeatedly should parse a fresh tree instead.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    title: Option<String>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            title: None,
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Children of `node`, including text nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map(|entry| entry.children.as_slice()).unwrap_or_default()
    }

    /// Text of a text node, `None` for elements.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Attributes of an element in insertion order.
    pub fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        match self.nodes.get(node.0).map(|entry| &entry.kind) {
            Some(NodeKind::Element { attributes, .. }) => {
                attributes.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Adopt the text of the first `<title>` element as the document title.
    pub(crate) fn sync_title_from_markup(&mut self) {
        self.title = self
            .elements_by_tag("title")
            .first()
            .map(|title| self.text_content(*title).trim().to_string());
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    fn element_attributes(&self, node: NodeId) -> Option<&IndexMap<String, String>> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Element nodes below `start` in document order.
    fn walk_elements(&self, start: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = self.children(start).iter().rev().copied().collect::<Vec<_>>();
        while let Some(node) = stack.pop() {
            if matches!(self.nodes[node.0].kind, NodeKind::Element { .. }) {
                found.push(node);
            }
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        found
    }

    fn collect_text(&self, node: NodeId, output: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => output.push_str(text),
            _ => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, output);
                }
            }
        }
    }

    fn build_fragment(&mut self, fragment: &Fragment) -> NodeId {
        let element = self.create_element(&fragment.tag);
        for (name, value) in &fragment.attributes {
            self.set_attribute(element, name, value);
        }
        for child in &fragment.children {
            let built = match child {
                FragmentNode::Element(nested) => self.build_fragment(nested),
                FragmentNode::Text(text) => self.create_text(text),
            };
            self.append_child(element, built);
        }
        element
    }
}

impl PageDom for DomTree {
    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.walk_elements(ROOT)
            .into_iter()
            .filter(|node| self.element_attributes(*node).is_some_and(|attributes| attributes.contains_key(attribute)))
            .collect()
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.walk_elements(ROOT)
            .into_iter()
            .filter(|node| self.tag_name(*node).is_some_and(|name| name.eq_ignore_ascii_case(tag)))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.first_with_attribute_value("id", id)
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        if node.0 >= self.nodes.len() {
            return Vec::new();
        }
        self.walk_elements(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent.filter(|parent| *parent != ROOT)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element_attributes(node)?.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(Node {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(Node {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            attributes.shift_remove(name);
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut output = String::new();
        if node.0 < self.nodes.len() {
            self.collect_text(node, &mut output);
        }
        output
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if node.0 >= self.nodes.len() {
            return;
        }
        self.clear_children(node);
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node);
        }
    }

    fn document_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_document_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn clear_children(&mut self, node: NodeId) {
        self.take_children(node);
    }

    fn take_children(&mut self, node: NodeId) -> Vec<NodeId> {
        let Some(entry) = self.nodes.get_mut(node.0) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut entry.children);
        for child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    fn replace_children(&mut self, node: NodeId, children: &[NodeId]) {
        if node.0 >= self.nodes.len() {
            return;
        }
        self.clear_children(node);
        for child in children {
            if child.0 < self.nodes.len() && *child != ROOT && *child != node {
                self.append_child(node, *child);
            }
        }
    }

    fn append_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> NodeId {
        let built = self.build_fragment(fragment);
        self.append_child(parent, built);
        built
    }

    fn append_text(&mut self, parent: NodeId, text: &str) {
        if parent.0 < self.nodes.len() {
            let text_node = self.create_text(text);
            self.append_child(parent, text_node);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        if node != ROOT && node.0 < self.nodes.len() {
            self.detach(node);
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ROOT {
                return true;
            }
            current = self.nodes.get(candidate.0).and_then(|entry| entry.parent);
        }
        false
    }
}
