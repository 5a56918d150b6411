use mockito::Matcher;
use serde_json::json;
use sitebind_api::SiteClient;
use sitebind_types::{EmailMessage, SubmissionError};
use sitebind_util::SiteSettings;

fn message() -> EmailMessage {
    EmailMessage {
        to: "owner@example.com".into(),
        subject: "CONTACT FORM submission by visitor@example.com".into(),
        message: "Hello there".into(),
        name: "Visitor".into(),
    }
}

fn client() -> SiteClient {
    SiteClient::new(&SiteSettings::default()).expect("build client")
}

#[tokio::test]
async fn posts_message_as_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/send-email")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "to": "owner@example.com",
            "subject": "CONTACT FORM submission by visitor@example.com",
            "message": "Hello there",
            "name": "Visitor"
        })))
        .with_status(202)
        .with_body(r#"{"ok": true}"#)
        .expect(1)
        .create_async()
        .await;

    let endpoint = format!("{}/api/v1/send-email", server.url());
    client().send_email(&endpoint, &message()).await.expect("delivered");
    mock.assert_async().await;
}

#[tokio::test]
async fn rejection_carries_service_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/send")
        .with_status(400)
        .with_body(r#"{"error": "recipient not allowed"}"#)
        .create_async()
        .await;

    let endpoint = format!("{}/send", server.url());
    let error = client().send_email(&endpoint, &message()).await.unwrap_err();
    match error {
        SubmissionError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "recipient not allowed");
        }
        other => panic!("expected rejection, got {other}"),
    }
}

#[tokio::test]
async fn rejection_without_json_body_uses_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/send")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let endpoint = format!("{}/send", server.url());
    let error = client().send_email(&endpoint, &message()).await.unwrap_err();
    assert_eq!(error.to_string(), "Server error: 503");
}

#[tokio::test]
async fn plain_http_remote_endpoint_is_refused() {
    let error = client()
        .send_email("http://mail.example.com/send", &message())
        .await
        .unwrap_err();
    assert!(matches!(error, SubmissionError::InvalidEndpoint { .. }));
}
