//! Scroll-driven behaviour: smooth anchor scrolling, navbar styling, and
//! active navigation highlighting.
//!
//! Geometry comes from the host as a [`PageLayout`]; this module only
//! computes offsets and edits classes.

use std::time::{Duration, Instant};

use sitebind_util::Debouncer;
use tracing::{debug, trace};

use crate::dom::{NodeId, PageDom};

pub const NAVBAR_CLASS: &str = "custom-navbar";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";

/// Scroll offset past which the navbar gets `scrolled`.
pub const SCROLLED_THRESHOLD: f64 = 100.0;
/// Scroll offset past which scrolling down hides the navbar.
pub const HIDE_THRESHOLD: f64 = 500.0;
/// Extra lead before a section counts as active.
pub const ACTIVE_SECTION_LEAD: f64 = 100.0;

/// Position and size of a page section, in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Layout snapshot supplied by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub navbar_height: f64,
    /// Sections with an `id`, in document order.
    pub sections: Vec<SectionBox>,
}

impl PageLayout {
    pub fn section(&self, id: &str) -> Option<&SectionBox> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Section id named by an in-page anchor (`#about` → `about`).
pub fn in_page_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll offset that brings the anchor's section just below the navbar.
pub fn scroll_target(layout: &PageLayout, href: &str) -> Option<f64> {
    let id = in_page_target(href)?;
    let section = layout.section(id)?;
    Some(section.top - layout.navbar_height)
}

/// Collapse an expanded mobile menu. Returns whether it was open.
pub fn collapse_mobile_menu<D: PageDom + ?Sized>(dom: &mut D) -> bool {
    let Some(menu) = dom.elements_by_class("navbar-collapse").into_iter().next() else {
        return false;
    };
    if !dom.has_class(menu, "show") {
        return false;
    }
    dom.remove_class(menu, "show");
    true
}

/// Handle a click on an in-page anchor: compute the scroll target and close
/// the mobile menu. Returns `None` when the anchor has no matching section.
pub fn handle_anchor_click<D: PageDom + ?Sized>(dom: &mut D, layout: &PageLayout, href: &str) -> Option<f64> {
    let target = scroll_target(layout, href)?;
    if collapse_mobile_menu(dom) {
        debug!(href, "mobile menu collapsed after navigation");
    }
    Some(target)
}

/// Anchors whose clicks scroll smoothly.
pub fn in_page_anchors<D: PageDom + ?Sized>(dom: &D) -> Vec<NodeId> {
    dom.elements_by_tag("a")
        .into_iter()
        .filter(|anchor| dom.attribute(*anchor, "href").is_some_and(|href| href.starts_with('#')))
        .collect()
}

/// Navbar appearance for one scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarStyle {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Remembers the previous scroll offset to detect scroll direction.
#[derive(Debug, Clone, Default)]
pub struct NavbarScrollState {
    last_scroll_top: f64,
}

impl NavbarScrollState {
    pub fn on_scroll(&mut self, scroll_top: f64) -> NavbarStyle {
        let style = NavbarStyle {
            scrolled: scroll_top > SCROLLED_THRESHOLD,
            hidden: scroll_top > self.last_scroll_top && scroll_top > HIDE_THRESHOLD,
        };
        self.last_scroll_top = scroll_top.max(0.0);
        style
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }
}

pub fn apply_navbar_style<D: PageDom + ?Sized>(dom: &mut D, navbar: NodeId, style: NavbarStyle) {
    if style.scrolled {
        dom.add_class(navbar, SCROLLED_CLASS);
    } else {
        dom.remove_class(navbar, SCROLLED_CLASS);
    }
    let transform = if style.hidden { "translateY(-100%)" } else { "translateY(0)" };
    dom.set_style_property(navbar, "transform", transform);
}

/// Id of the section containing `scroll_y`; the last match wins.
pub fn active_section(layout: &PageLayout, scroll_y: f64) -> Option<&str> {
    layout
        .sections
        .iter()
        .filter(|section| {
            let start = section.top - layout.navbar_height - ACTIVE_SECTION_LEAD;
            scroll_y >= start && scroll_y < start + section.height
        })
        .last()
        .map(|section| section.id.as_str())
}

/// Mark `.navbar-nav .nav-link[href="#<current>"]` active and clear the
/// other in-page navbar links. Links to other pages keep their classes.
///
/// Returns the number of links marked active.
pub fn highlight_active_link<D: PageDom + ?Sized>(dom: &mut D, current: Option<&str>) -> usize {
    let target = current.map(|id| format!("#{id}"));
    let links = dom
        .elements_by_class("nav-link")
        .into_iter()
        .filter(|link| dom.closest_ancestor_with_class(*link, "navbar-nav").is_some())
        .filter(|link| dom.attribute(*link, "href").is_some_and(|href| href.starts_with('#')))
        .collect::<Vec<_>>();

    let mut marked = 0;
    for link in links {
        dom.remove_class(link, ACTIVE_CLASS);
        if target.is_some() && dom.attribute(link, "href") == target.as_deref() {
            dom.add_class(link, ACTIVE_CLASS);
            marked += 1;
        }
    }
    marked
}

/// Scroll event handling for one page.
///
/// Navbar styling follows every event. Active-link evaluation is coalesced
/// by a trailing-edge debouncer and runs from [`ScrollController::tick`].
#[derive(Debug, Clone)]
pub struct ScrollController {
    navbar: NavbarScrollState,
    debouncer: Debouncer,
    latest_scroll_y: f64,
    active: Option<String>,
}

impl ScrollController {
    pub fn new(delay: Duration) -> Self {
        Self {
            navbar: NavbarScrollState::default(),
            debouncer: Debouncer::new(delay),
            latest_scroll_y: 0.0,
            active: None,
        }
    }

    /// Record a scroll event at `now`.
    pub fn on_scroll<D: PageDom + ?Sized>(&mut self, dom: &mut D, scroll_y: f64, now: Instant) -> NavbarStyle {
        let style = self.navbar.on_scroll(scroll_y);
        if let Some(navbar) = dom.elements_by_class(NAVBAR_CLASS).into_iter().next() {
            apply_navbar_style(dom, navbar, style);
        }
        self.latest_scroll_y = scroll_y;
        self.debouncer.trigger(now);
        trace!(scroll_y, "scroll event recorded");
        style
    }

    /// When the host should call [`ScrollController::tick`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Run the debounced active-link evaluation if it is due. Returns whether it ran.
    pub fn tick<D: PageDom + ?Sized>(&mut self, dom: &mut D, layout: &PageLayout, now: Instant) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }
        let current = active_section(layout, self.latest_scroll_y).map(str::to_string);
        highlight_active_link(dom, current.as_deref());
        debug!(section = current.as_deref().unwrap_or("none"), "active section evaluated");
        self.active = current;
        true
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }
}
