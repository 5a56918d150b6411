use std::time::Duration;

/// Outcome shown to the visitor after a contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// Bootstrap alert modifier class.
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
        }
    }

    /// Font Awesome icon class shown before the message.
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle me-2",
            Self::Error => "fas fa-exclamation-circle me-2",
        }
    }

    /// How long the notice stays before it is dismissed automatically.
    pub fn dismiss_after(self) -> Duration {
        match self {
            Self::Success => Duration::from_secs(8),
            Self::Error => Duration::from_secs(10),
        }
    }

    /// Message used when the caller does not supply one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Success => "Thank you for your message! We'll get back to you soon.",
            Self::Error => "There was an error processing your request. Please try again.",
        }
    }
}

/// Message shown after a successful submission.
pub const SUBMISSION_SUCCESS_MESSAGE: &str =
    "Thank you for contacting us! Your message has been sent successfully. We'll get back to you soon.";

/// Message shown after a failed submission.
pub const SUBMISSION_ERROR_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again later or contact us directly.";
