//! Email service delivery for contact form submissions.

use reqwest::Method;
use sitebind_types::{EmailMessage, SubmissionError};
use sitebind_util::{redact_sensitive, service_error_message};
use tracing::{debug, info, warn};

use crate::{SiteClient, validate_endpoint_url};

impl SiteClient {
    /// POST a contact message as JSON to the email service.
    ///
    /// Any 2xx response is success. A non-2xx response becomes
    /// [`SubmissionError::Rejected`] carrying the service's `error` field when
    /// the body provides one.
    pub async fn send_email(&self, endpoint: &str, message: &EmailMessage) -> Result<(), SubmissionError> {
        let url = validate_endpoint_url(endpoint).map_err(|error| SubmissionError::invalid_endpoint(endpoint, error.to_string()))?;
        debug!(
            endpoint = %redact_sensitive(endpoint),
            to = %redact_sensitive(&message.to),
            message_len = message.message.len(),
            "sending contact email"
        );

        let response = self
            .request(Method::POST, url)
            .json(message)
            .send()
            .await
            .map_err(|error| SubmissionError::network(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "contact email accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = SubmissionError::rejected(status.as_u16(), service_error_message(&body));
        warn!(status = status.as_u16(), error = %error, "email service rejected submission");
        Err(error)
    }
}
