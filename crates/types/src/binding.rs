//! Binding vocabulary shared between the binder and its diagnostics.
//!
//! Attribute names and container markers form the page's wire contract with
//! the content document and must stay stable.

/// How a resolved value is written onto an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `data-content`: text content, plus the document title for `<title>`.
    Text,
    /// `data-src`: the `src` attribute.
    ImageSource,
    /// `data-alt`: the `alt` attribute.
    AltText,
    /// `data-href`: the `href` attribute.
    Href,
}

impl BindingKind {
    /// All kinds in the order the binder applies them.
    pub const ALL: [BindingKind; 4] = [Self::Text, Self::ImageSource, Self::AltText, Self::Href];

    /// Attribute that carries the bind path.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Text => "data-content",
            Self::ImageSource => "data-src",
            Self::AltText => "data-alt",
            Self::Href => "data-href",
        }
    }

    /// Element attribute written for attribute-valued kinds.
    pub fn target_attribute(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::ImageSource => Some("src"),
            Self::AltText => Some("alt"),
            Self::Href => Some("href"),
        }
    }
}

/// How a list section container is located in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerMarker {
    /// First element whose attribute equals the value.
    Attribute { name: &'static str, value: &'static str },
    /// Element with the given `id`.
    Id(&'static str),
}

/// Repeated sections regenerated from document arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    About,
    Navigation,
    Products,
    Features,
    SocialLinks,
    FooterLinks,
}

impl ListSection {
    /// All sections in regeneration order.
    pub const ALL: [ListSection; 6] = [
        Self::About,
        Self::Navigation,
        Self::Products,
        Self::Features,
        Self::SocialLinks,
        Self::FooterLinks,
    ];

    /// Container marker in the page.
    pub fn marker(self) -> ContainerMarker {
        match self {
            Self::About => ContainerMarker::Attribute {
                name: "data-content-array",
                value: "about.content",
            },
            Self::Navigation => ContainerMarker::Attribute {
                name: "data-nav",
                value: "site.navigation",
            },
            Self::Products => ContainerMarker::Id("products-container"),
            Self::Features => ContainerMarker::Id("features-container"),
            Self::SocialLinks => ContainerMarker::Id("social-links"),
            Self::FooterLinks => ContainerMarker::Id("footer-links"),
        }
    }

    /// Document path feeding the section.
    pub fn source_path(self) -> &'static str {
        match self {
            Self::About => "about.content",
            Self::Navigation => "site.navigation",
            Self::Products => "collection.products",
            Self::Features => "features.items",
            Self::SocialLinks => "site.socialMedia",
            Self::FooterLinks => "footer.links",
        }
    }

    /// Short name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Navigation => "navigation",
            Self::Products => "products",
            Self::Features => "features",
            Self::SocialLinks => "social-links",
            Self::FooterLinks => "footer-links",
        }
    }
}
