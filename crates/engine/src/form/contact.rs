//! Contact form submission.
//!
//! A submission is split in two halves around the network call:
//! [`ContactForm::begin`] validates the form, disables the send button and
//! packages the message; [`ContactForm::finish`] shows the notice, resets the
//! form on success and restores the button. [`ContactForm::submit`] runs both
//! halves around an [`EmailTransport`].

use async_trait::async_trait;
use chrono::{DateTime, TimeZone};
use sitebind_api::SiteClient;
use sitebind_types::{
    ContentDocument, EmailMessage, NoticeKind, SUBMISSION_ERROR_MESSAGE, SUBMISSION_SUCCESS_MESSAGE, SubmissionError,
};
use sitebind_util::{SiteSettings, format_submission_timestamp, redact_sensitive};
use std::fmt::Display;
use tracing::{error, info, warn};

use super::notice::{NoticeHandle, show_notice};
use super::validation::{INVALID_CLASS, VALID_CLASS, form_fields, validate_form};
use crate::dom::{Fragment, NodeId, PageDom};

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const SEND_BUTTON_CLASS: &str = "btn-send";
pub const SENDING_LABEL: &str = "Sending...";

/// Site name used in the message body.
pub const DEFAULT_SITE_NAME: &str = "Eshaaz";

/// Where contact messages go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSettings {
    pub endpoint: String,
    pub recipient_email: String,
    pub site_name: String,
}

impl ContactSettings {
    /// Document `config.emailService` values win over host settings.
    pub fn resolve(settings: &SiteSettings, document: Option<&ContentDocument>) -> Self {
        let overrides = document.map(ContentDocument::email_service).unwrap_or_default();
        let non_blank = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        Self {
            endpoint: non_blank(overrides.endpoint).unwrap_or_else(|| settings.email_endpoint.clone()),
            recipient_email: non_blank(overrides.recipient_email).unwrap_or_else(|| settings.recipient_email.clone()),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self::resolve(&SiteSettings::default(), None)
    }
}

/// Trimmed values of the contact form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Package a submission for the email service.
pub fn compose_message(settings: &ContactSettings, details: &ContactDetails, submitted_at: &str) -> EmailMessage {
    let site = &settings.site_name;
    let body = format!(
        "CONTACT FORM SUBMISSION FROM {upper} WEBSITE

Sender Information:
------------------
Name: {name}
Email: {email}
Submission Date: {submitted_at}

Message:
--------
{message}

------------------
Note: This is an automated email from the {site} website contact form. Please do not reply to this email address. Contact the sender directly at their provided email address.",
        upper = site.to_uppercase(),
        name = details.name,
        email = details.email,
        message = details.message,
    );

    EmailMessage {
        to: settings.recipient_email.clone(),
        subject: format!("CONTACT FORM submission by {}", details.email),
        message: body,
        name: details.name.clone(),
    }
}

/// Delivers composed messages. Implemented by [`SiteClient`]; tests use fakes.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn deliver(&self, endpoint: &str, message: &EmailMessage) -> Result<(), SubmissionError>;
}

#[async_trait]
impl EmailTransport for SiteClient {
    async fn deliver(&self, endpoint: &str, message: &EmailMessage) -> Result<(), SubmissionError> {
        self.send_email(endpoint, message).await
    }
}

/// A submission between [`ContactForm::begin`] and [`ContactForm::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub endpoint: String,
    pub message: EmailMessage,
    /// Send button and its original children, restored by `finish`.
    button: Option<(NodeId, Vec<NodeId>)>,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    Sent { notice: NoticeHandle },
    Failed { error: SubmissionError, notice: NoticeHandle },
}

impl SubmissionOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Handle to the page's `#contactForm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactForm {
    form: NodeId,
}

impl ContactForm {
    pub fn locate<D: PageDom + ?Sized>(dom: &D) -> Option<Self> {
        dom.element_by_id(CONTACT_FORM_ID).map(|form| Self { form })
    }

    pub fn node(&self) -> NodeId {
        self.form
    }

    /// Field with the given `name` attribute.
    pub fn field<D: PageDom + ?Sized>(&self, dom: &D, name: &str) -> Option<NodeId> {
        form_fields(dom, self.form)
            .into_iter()
            .find(|field| dom.attribute(*field, "name") == Some(name))
    }

    pub fn send_button<D: PageDom + ?Sized>(&self, dom: &D) -> Option<NodeId> {
        dom.descendants(self.form)
            .into_iter()
            .find(|node| dom.has_class(*node, SEND_BUTTON_CLASS))
    }

    pub fn details<D: PageDom + ?Sized>(&self, dom: &D) -> ContactDetails {
        let value = |name: &str| {
            self.field(dom, name)
                .map(|field| dom.field_value(field).trim().to_string())
                .unwrap_or_default()
        };
        ContactDetails {
            name: value("name"),
            email: value("email"),
            message: value("message"),
        }
    }

    /// Write values into the form fields that exist.
    pub fn fill<D: PageDom + ?Sized>(&self, dom: &mut D, details: &ContactDetails) {
        for (name, value) in [("name", &details.name), ("email", &details.email), ("message", &details.message)] {
            if let Some(field) = self.field(dom, name) {
                dom.set_field_value(field, value);
            }
        }
    }

    /// Validate and, if valid, put the form in its sending state.
    ///
    /// Returns `None` when validation fails; the invalid fields are marked.
    pub fn begin<D, Tz>(&self, dom: &mut D, settings: &ContactSettings, submitted_at: &DateTime<Tz>) -> Option<PendingSubmission>
    where
        D: PageDom + ?Sized,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if !validate_form(dom, self.form) {
            info!("contact form has invalid fields; submission skipped");
            return None;
        }

        let details = self.details(dom);
        let message = compose_message(settings, &details, &format_submission_timestamp(submitted_at));

        let button = self.send_button(dom).map(|button| {
            let original = dom.take_children(button);
            dom.set_attribute(button, "disabled", "");
            dom.append_fragment(button, &Fragment::new("i").class("fas fa-spinner fa-spin me-2"));
            dom.append_text(button, SENDING_LABEL);
            (button, original)
        });

        info!(
            endpoint = %redact_sensitive(&settings.endpoint),
            sender = %redact_sensitive(&details.email),
            "submitting contact form"
        );
        Some(PendingSubmission {
            endpoint: settings.endpoint.clone(),
            message,
            button,
        })
    }

    /// Apply the delivery result to the page.
    pub fn finish<D: PageDom + ?Sized>(
        &self,
        dom: &mut D,
        pending: PendingSubmission,
        result: Result<(), SubmissionError>,
    ) -> SubmissionOutcome {
        let outcome = match result {
            Ok(()) => {
                let notice = show_notice(dom, self.form, NoticeKind::Success, Some(SUBMISSION_SUCCESS_MESSAGE));
                self.reset(dom);
                SubmissionOutcome::Sent { notice }
            }
            Err(submission_error) => {
                error!(error = %submission_error, "Error submitting form");
                let notice = show_notice(dom, self.form, NoticeKind::Error, Some(SUBMISSION_ERROR_MESSAGE));
                SubmissionOutcome::Failed {
                    error: submission_error,
                    notice,
                }
            }
        };

        if let Some((button, original)) = pending.button {
            dom.remove_attribute(button, "disabled");
            dom.replace_children(button, &original);
        }
        outcome
    }

    /// Validate, send through `transport`, and report the result on the page.
    pub async fn submit<D, T, Tz>(
        &self,
        dom: &mut D,
        transport: &T,
        settings: &ContactSettings,
        submitted_at: &DateTime<Tz>,
    ) -> SubmissionOutcome
    where
        D: PageDom + ?Sized,
        T: EmailTransport + ?Sized,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(pending) = self.begin(dom, settings, submitted_at) else {
            return SubmissionOutcome::Invalid;
        };
        let result = transport.deliver(&pending.endpoint, &pending.message).await;
        if result.is_err() {
            warn!("contact message was not delivered");
        }
        self.finish(dom, pending, result)
    }

    /// Clear values and validity classes.
    pub fn reset<D: PageDom + ?Sized>(&self, dom: &mut D) {
        for field in form_fields(dom, self.form) {
            dom.set_field_value(field, "");
            dom.remove_class(field, VALID_CLASS);
            dom.remove_class(field, INVALID_CLASS);
        }
    }
}
