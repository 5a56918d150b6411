//! Contact form: validation, notices, and submission to the email service.

pub mod contact;
pub mod notice;
pub mod validation;

pub use contact::{
    CONTACT_FORM_ID, ContactDetails, ContactForm, ContactSettings, EmailTransport, PendingSubmission, SubmissionOutcome,
    compose_message,
};
pub use notice::{FORM_ALERT_CLASS, NoticeHandle, dismiss_notice, show_notice};
pub use validation::{FieldRules, form_fields, revalidate_on_input, update_character_count, validate_field, validate_form};
