//! HTML parsing into [`DomTree`] and serialisation back out.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use scraper::{Html, Node};

use super::{DomTree, NodeId, PageDom};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Parse an authored page. Comments, doctype and processing instructions are dropped.
pub fn parse_page(markup: &str) -> DomTree {
    let html = Html::parse_document(markup);
    let mut tree = DomTree::new();
    let mut mapping = HashMap::new();

    for node in html.tree.root().descendants() {
        let created = match node.value() {
            Node::Document | Node::Fragment => {
                mapping.insert(node.id(), tree.root());
                continue;
            }
            Node::Element(element) => {
                let created = tree.create_element(element.name());
                for (name, value) in element.attrs() {
                    tree.set_attribute(created, name, value);
                }
                created
            }
            Node::Text(text) => tree.create_text(&**text),
            _ => continue,
        };
        let parent = node
            .parent()
            .and_then(|parent| mapping.get(&parent.id()).copied())
            .unwrap_or_else(|| tree.root());
        tree.append_child(parent, created);
        mapping.insert(node.id(), created);
    }

    tree.sync_title_from_markup();
    tree
}

/// Read and parse a page from disk.
pub fn read_page(path: &Path) -> Result<DomTree> {
    let markup = std::fs::read_to_string(path).with_context(|| format!("read page {}", path.display()))?;
    Ok(parse_page(&markup))
}

/// Serialise `node` and its subtree.
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    let mut output = String::new();
    write_node(tree, node, &mut output);
    output
}

fn write_node(tree: &DomTree, node: NodeId, output: &mut String) {
    if let Some(text) = tree.text(node) {
        output.push_str(&escape(text, false));
        return;
    }
    let Some(tag) = tree.tag_name(node) else {
        for child in tree.children(node) {
            write_node(tree, *child, output);
        }
        return;
    };

    output.push('<');
    output.push_str(tag);
    for (name, value) in tree.attributes(node) {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape(value, true));
        output.push('"');
    }
    output.push('>');
    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    for child in tree.children(node) {
        write_node(tree, *child, output);
    }
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
