//! Shared type definitions for sitebind: the content document, the typed
//! list-section records, the binding vocabulary and the error types.

pub mod binding;
pub mod content;
pub mod error;
pub mod model;
pub mod notice;

pub use binding::{BindingKind, ContainerMarker, ListSection};
pub use content::{ContentDocument, DEFAULT_CURRENCY, display_text, json_kind, resolve_path};
pub use error::{LoadError, SubmissionError};
pub use model::{EmailServiceConfig, Feature, FooterLink, NavItem, Product, SocialMedia, SocialPlatform};
pub use notice::{NoticeKind, SUBMISSION_ERROR_MESSAGE, SUBMISSION_SUCCESS_MESSAGE};

/// Outbound contact message posted to the email service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    pub subject: String,
    /// Formatted body including sender details and submission time.
    pub message: String,
    /// Sender name.
    pub name: String,
}
