//! Content binder.
//!
//! One synchronous pass over the page: every element carrying a binding
//! attribute receives the value its dot path resolves to, then each list
//! section container is regenerated from its array. Unresolved paths and
//! missing containers are skipped silently (logged at debug level); the
//! returned [`BindReport`] records them for diagnostics.

pub mod sections;

use sitebind_types::{BindingKind, ContainerMarker, ContentDocument, ListSection};
use tracing::{debug, info};

use crate::dom::{Fragment, NodeId, PageDom};

/// A binding whose path did not resolve to a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedBinding {
    pub node: NodeId,
    pub kind: BindingKind,
    pub path: String,
}

/// What happened to one list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Container regenerated with `items` children.
    Rendered { items: usize },
    /// No container in the page; nothing touched.
    MissingContainer,
    /// Container present but the document has no array for it; authored children kept.
    MissingData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Elements that received a value.
    pub applied: usize,
    pub unresolved: Vec<UnresolvedBinding>,
    pub sections: Vec<(ListSection, SectionOutcome)>,
}

impl BindReport {
    pub fn rendered_sections(&self) -> usize {
        self.sections
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SectionOutcome::Rendered { .. }))
            .count()
    }

    pub fn section_outcome(&self, section: ListSection) -> Option<SectionOutcome> {
        self.sections
            .iter()
            .find(|(candidate, _)| *candidate == section)
            .map(|(_, outcome)| *outcome)
    }
}

/// Hydrate `dom` from `document`.
///
/// The document is only read. Running the pass twice yields the same page
/// because list sections discard their previous children.
pub fn bind<D: PageDom + ?Sized>(dom: &mut D, document: &ContentDocument) -> BindReport {
    let mut report = BindReport::default();

    for kind in BindingKind::ALL {
        for node in dom.elements_with_attribute(kind.attribute()) {
            let Some(path) = dom.attribute(node, kind.attribute()).map(str::to_string) else {
                continue;
            };
            match document.lookup_text(&path) {
                Some(value) => {
                    apply_binding(dom, node, kind, &value);
                    report.applied += 1;
                }
                None => {
                    debug!(path = %path, attribute = kind.attribute(), "binding path unresolved; keeping authored content");
                    report.unresolved.push(UnresolvedBinding { node, kind, path });
                }
            }
        }
    }

    for section in ListSection::ALL {
        let outcome = render_section(dom, document, section);
        debug!(section = section.name(), ?outcome, "list section processed");
        report.sections.push((section, outcome));
    }

    info!(
        applied = report.applied,
        unresolved = report.unresolved.len(),
        sections = report.rendered_sections(),
        "content bound"
    );
    report
}

fn apply_binding<D: PageDom + ?Sized>(dom: &mut D, node: NodeId, kind: BindingKind, value: &str) {
    match kind.target_attribute() {
        Some(attribute) => dom.set_attribute(node, attribute, value),
        None => {
            if dom.tag_name(node) == Some("title") {
                dom.set_document_title(value);
            }
            dom.set_text_content(node, value);
        }
    }
}

/// Locate the container for `section`.
pub fn section_container<D: PageDom + ?Sized>(dom: &D, section: ListSection) -> Option<NodeId> {
    match section.marker() {
        ContainerMarker::Attribute { name, value } => dom.first_with_attribute_value(name, value),
        ContainerMarker::Id(id) => dom.element_by_id(id),
    }
}

fn section_fragments(document: &ContentDocument, section: ListSection) -> Option<Vec<Fragment>> {
    match section {
        ListSection::About => document
            .about_paragraphs()
            .map(|paragraphs| paragraphs.iter().map(|text| sections::about_paragraph(text)).collect()),
        ListSection::Navigation => document
            .navigation()
            .map(|items| items.iter().map(sections::nav_item).collect()),
        ListSection::Products => {
            let currency = document.currency();
            document
                .products()
                .map(|products| products.iter().map(|product| sections::product_card(product, currency)).collect())
        }
        ListSection::Features => document
            .features()
            .map(|features| features.iter().map(sections::feature_card).collect()),
        ListSection::SocialLinks => document.social_media().map(|social| sections::social_links(&social)),
        ListSection::FooterLinks => document
            .footer_links()
            .map(|links| links.iter().map(sections::footer_link).collect()),
    }
}

fn render_section<D: PageDom + ?Sized>(dom: &mut D, document: &ContentDocument, section: ListSection) -> SectionOutcome {
    let Some(container) = section_container(dom, section) else {
        return SectionOutcome::MissingContainer;
    };
    let Some(fragments) = section_fragments(document, section) else {
        return SectionOutcome::MissingData;
    };

    dom.clear_children(container);
    for fragment in &fragments {
        dom.append_fragment(container, fragment);
    }
    SectionOutcome::Rendered { items: fragments.len() }
}
