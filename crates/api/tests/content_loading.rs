use sitebind_api::{ContentSource, SiteClient};
use sitebind_types::LoadError;
use sitebind_util::SiteSettings;

fn client() -> SiteClient {
    SiteClient::new(&SiteSettings::default()).expect("build client")
}

fn url_source(server: &mockito::Server, path: &str) -> ContentSource {
    ContentSource::parse(&format!("{}{}", server.url(), path)).expect("valid url")
}

#[tokio::test]
async fn loads_document_from_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"site": {"title": "Eshaaz"}, "currency": "$"}"#)
        .expect(1)
        .create_async()
        .await;

    let document = client().load_content(&url_source(&server, "/data.json")).await.expect("load");
    assert_eq!(document.lookup_text("site.title").as_deref(), Some("Eshaaz"));
    assert_eq!(document.currency(), "$");
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_a_load_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("GET", "/data.json").with_status(404).create_async().await;

    let error = client().load_content(&url_source(&server, "/data.json")).await.unwrap_err();
    assert!(matches!(error, LoadError::Status { status: 404, .. }), "unexpected error: {error}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data.json")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let error = client().load_content(&url_source(&server, "/data.json")).await.unwrap_err();
    match error {
        LoadError::Parse { message } => assert!(message.contains("maintenance"), "message: {message}"),
        other => panic!("expected parse error, got {other}"),
    }
}

#[tokio::test]
async fn array_root_is_a_shape_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("GET", "/data.json").with_status(200).with_body("[]").create_async().await;

    let error = client().load_content(&url_source(&server, "/data.json")).await.unwrap_err();
    assert!(matches!(error, LoadError::Shape { found: "array" }));
}

#[tokio::test]
async fn loads_document_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"footer": {"links": [{"name": "Privacy", "href": "/privacy"}]}}"#).unwrap();

    let document = client()
        .load_content(&ContentSource::File(path))
        .await
        .expect("load from file");
    let links = document.footer_links().expect("footer links");
    assert_eq!(links[0].name, "Privacy");
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = client()
        .load_content(&ContentSource::File(dir.path().join("absent.json")))
        .await
        .unwrap_err();
    assert!(matches!(error, LoadError::Io { .. }));
}
