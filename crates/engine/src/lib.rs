//! # Sitebind Engine
//!
//! The page runtime for a content-driven static site. A JSON content document
//! is mapped onto the page through attribute bindings, and the page's
//! interactive behaviour is wired around it.
//!
//! ## Key Features
//!
//! - **Binding**: `data-content`, `data-src`, `data-alt` and `data-href`
//!   attributes resolve dot paths against the document
//! - **List sections**: navigation, products, features, social and footer
//!   links are regenerated from document arrays
//! - **Forms**: field validation, character counters, and contact submission
//!   to an email service
//! - **Scrolling**: smooth anchor targets, navbar styling, and debounced
//!   active-link highlighting
//!
//! ## Usage
//!
//! ```rust
//! use sitebind_engine::{PageDom, bind, parse_page};
//! use sitebind_types::ContentDocument;
//!
//! let mut page = parse_page(r#"<h1 data-content="hero.title">Welcome</h1>"#);
//! let document = ContentDocument::from_json_str(r#"{"hero": {"title": "Handmade in Dhaka"}}"#)?;
//!
//! let report = bind(&mut page, &document);
//! let heading = page.elements_by_tag("h1")[0];
//! assert_eq!(page.text_content(heading), "Handmade in Dhaka");
//! assert_eq!(report.applied, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`dom`**: the [`PageDom`] port and the in-memory [`DomTree`]
//! - **`binder`**: the binding pass and list-section builders
//! - **`form`**: validation, notices and contact submission
//! - **`scroll`**: navbar, anchor and active-link behaviour
//! - **`reveal`**: reveal-on-scroll markers
//! - **`page`**: the initializer tying it together
//! - **`field_paths`**: diagnostics for unresolved bind paths

pub mod binder;
pub mod dom;
pub mod field_paths;
pub mod form;
pub mod page;
pub mod reveal;
pub mod scroll;

pub use binder::{BindReport, SectionOutcome, UnresolvedBinding, bind, section_container};
pub use dom::{DomTree, Fragment, FragmentNode, NodeId, PageDom, outer_html, parse_page, read_page};
pub use field_paths::{MissingPathDetails, missing_details};
pub use form::{
    ContactDetails, ContactForm, ContactSettings, EmailTransport, NoticeHandle, SubmissionOutcome, dismiss_notice, validate_field,
    validate_form,
};
pub use page::{PageRuntime, UiWiring};
pub use reveal::RevealSet;
pub use scroll::{PageLayout, ScrollController, SectionBox};
