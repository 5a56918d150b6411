/// Detached element description appended with [`super::PageDom::append_fragment`].
///
/// Text is always stored as text nodes, so document values never become markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<FragmentNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element(Fragment),
    Text(String),
}

impl Fragment {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => *current = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Append space-separated classes to the `class` attribute.
    pub fn class(self, classes: &str) -> Self {
        let merged = match self.attribute("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {classes}"),
            _ => classes.to_string(),
        };
        self.attr("class", merged)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(FragmentNode::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Fragment) -> Self {
        self.children.push(FragmentNode::Element(child));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }
}
