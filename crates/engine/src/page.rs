//! Page initializer.
//!
//! Loads the content document, binds it when loading succeeded, and wires the
//! interactive behaviour either way so a page with authored fallback content
//! still navigates, validates and submits.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use sitebind_api::{ContentSource, SiteClient};
use sitebind_types::{ContentDocument, LoadError};
use sitebind_util::SiteSettings;
use tracing::{error, info};

use crate::binder::{BindReport, bind};
use crate::dom::{NodeId, PageDom};
use crate::form::{ContactForm, ContactSettings, EmailTransport, SubmissionOutcome, revalidate_on_input, validate_field};
use crate::reveal::RevealSet;
use crate::scroll::{NAVBAR_CLASS, PageLayout, ScrollController, handle_anchor_click, in_page_anchors};

/// Elements the runtime attached behaviour to.
#[derive(Debug, Clone, Default)]
pub struct UiWiring {
    /// In-page anchors scrolled smoothly on click.
    pub anchors: Vec<NodeId>,
    pub navbar: Option<NodeId>,
    pub contact_form: Option<ContactForm>,
    pub reveal: RevealSet,
}

impl UiWiring {
    fn attach<D: PageDom + ?Sized>(dom: &mut D) -> Self {
        let wiring = Self {
            anchors: in_page_anchors(dom),
            navbar: dom.elements_by_class(NAVBAR_CLASS).into_iter().next(),
            contact_form: ContactForm::locate(dom),
            reveal: RevealSet::mark(dom),
        };
        info!(
            anchors = wiring.anchors.len(),
            navbar = wiring.navbar.is_some(),
            contact_form = wiring.contact_form.is_some(),
            reveal_targets = wiring.reveal.pending().len(),
            "page behaviour wired"
        );
        wiring
    }
}

/// State of one hydrated page.
#[derive(Debug)]
pub struct PageRuntime {
    document: Option<Arc<ContentDocument>>,
    bind_report: Option<BindReport>,
    wiring: UiWiring,
    contact: ContactSettings,
    scroll: ScrollController,
}

impl PageRuntime {
    /// Load the document from `source` and initialize the page with the result.
    pub async fn load<D: PageDom + ?Sized>(dom: &mut D, client: &SiteClient, source: &ContentSource, settings: &SiteSettings) -> Self {
        let loaded = client.load_content(source).await;
        Self::initialize(dom, loaded, settings)
    }

    /// Bind a loaded document (skipped on load failure) and wire the page.
    pub fn initialize<D: PageDom + ?Sized>(dom: &mut D, loaded: Result<ContentDocument, LoadError>, settings: &SiteSettings) -> Self {
        let document = match loaded {
            Ok(document) => Some(Arc::new(document)),
            Err(load_error) => {
                error!(error = %load_error, "Error loading site data; keeping authored content");
                None
            }
        };
        let bind_report = document.as_deref().map(|document| bind(dom, document));
        let wiring = UiWiring::attach(dom);

        Self {
            contact: ContactSettings::resolve(settings, document.as_deref()),
            scroll: ScrollController::new(settings.scroll_debounce()),
            document,
            bind_report,
            wiring,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Arc<ContentDocument>> {
        self.document.as_ref()
    }

    pub fn bind_report(&self) -> Option<&BindReport> {
        self.bind_report.as_ref()
    }

    pub fn wiring(&self) -> &UiWiring {
        &self.wiring
    }

    pub fn wiring_mut(&mut self) -> &mut UiWiring {
        &mut self.wiring
    }

    pub fn contact_settings(&self) -> &ContactSettings {
        &self.contact
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollController {
        &mut self.scroll
    }

    /// Scroll target for a click on an in-page anchor.
    pub fn on_anchor_click<D: PageDom + ?Sized>(&self, dom: &mut D, layout: &PageLayout, href: &str) -> Option<f64> {
        handle_anchor_click(dom, layout, href)
    }

    pub fn on_field_blur<D: PageDom + ?Sized>(&self, dom: &mut D, field: NodeId) -> bool {
        validate_field(dom, field)
    }

    pub fn on_field_input<D: PageDom + ?Sized>(&self, dom: &mut D, field: NodeId) -> Option<bool> {
        revalidate_on_input(dom, field)
    }

    /// Submit the contact form. `None` when the page has no contact form.
    pub async fn submit_contact<D, T, Tz>(&self, dom: &mut D, transport: &T, submitted_at: &DateTime<Tz>) -> Option<SubmissionOutcome>
    where
        D: PageDom + ?Sized,
        T: EmailTransport + ?Sized,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let form = self.wiring.contact_form?;
        Some(form.submit(dom, transport, &self.contact, submitted_at).await)
    }
}
