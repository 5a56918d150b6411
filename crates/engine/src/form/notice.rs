use std::time::Duration;

use sitebind_types::NoticeKind;
use tracing::debug;

use crate::dom::{Fragment, NodeId, PageDom};

pub const FORM_ALERT_CLASS: &str = "form-alert";

/// A notice appended to a form. The host dismisses it after `dismiss_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeHandle {
    pub node: NodeId,
    pub kind: NoticeKind,
    pub dismiss_after: Duration,
}

/// Replace any existing form alert with a new one at the end of `form`.
pub fn show_notice<D: PageDom + ?Sized>(dom: &mut D, form: NodeId, kind: NoticeKind, message: Option<&str>) -> NoticeHandle {
    for existing in dom.elements_by_class(FORM_ALERT_CLASS) {
        dom.remove_node(existing);
    }

    let message = message.unwrap_or_else(|| kind.default_message());
    let fragment = Fragment::new("div")
        .class("alert")
        .class(kind.alert_class())
        .class("alert-dismissible fade show mt-3")
        .class(FORM_ALERT_CLASS)
        .child(Fragment::new("i").attr("class", kind.icon_class()))
        .text(message)
        .child(
            Fragment::new("button")
                .attr("type", "button")
                .class("btn-close")
                .attr("data-bs-dismiss", "alert"),
        );
    let node = dom.append_fragment(form, &fragment);
    debug!(?kind, "form notice shown");

    NoticeHandle {
        node,
        kind,
        dismiss_after: kind.dismiss_after(),
    }
}

/// Remove the notice if it is still on the page. Returns whether it was removed.
pub fn dismiss_notice<D: PageDom + ?Sized>(dom: &mut D, handle: &NoticeHandle) -> bool {
    if !dom.is_attached(handle.node) {
        return false;
    }
    dom.remove_node(handle.node);
    true
}
