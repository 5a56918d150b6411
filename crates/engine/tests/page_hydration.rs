use chrono::Utc;
use mockito::{Matcher, Server};
use serde_json::json;
use sitebind_api::{ContentSource, SiteClient};
use sitebind_engine::form::FORM_ALERT_CLASS;
use sitebind_engine::form::validation::INVALID_CLASS;
use sitebind_engine::{
    BindReport, DomTree, PageDom, PageRuntime, SectionOutcome, SubmissionOutcome, bind, outer_html, parse_page, section_container,
};
use sitebind_types::{BindingKind, ContentDocument, ListSection, resolve_path};
use sitebind_util::SiteSettings;

fn fixture_page() -> DomTree {
    parse_page(include_str!("data/index.html"))
}

fn fixture_document() -> ContentDocument {
    ContentDocument::from_json_str(include_str!("data/data.json")).expect("fixture document parses")
}

fn section_children(dom: &DomTree, section: ListSection) -> Vec<String> {
    let container = section_container(dom, section).expect("container present");
    dom.children(container)
        .iter()
        .map(|child| outer_html(dom, *child))
        .collect()
}

#[test]
fn every_resolved_binding_matches_the_document() {
    let mut dom = fixture_page();
    let document = fixture_document();
    let report = bind(&mut dom, &document);

    assert!(report.unresolved.is_empty(), "unexpected misses: {:?}", report.unresolved);
    for kind in BindingKind::ALL {
        for node in dom.elements_with_attribute(kind.attribute()) {
            let path = dom.attribute(node, kind.attribute()).unwrap().to_string();
            let expected = document.lookup_text(&path).unwrap();
            let actual = match kind.target_attribute() {
                Some(attribute) => dom.attribute(node, attribute).unwrap_or_default().to_string(),
                None => dom.text_content(node),
            };
            assert_eq!(actual, expected, "binding {path}");
        }
    }
    assert_eq!(dom.document_title(), Some("Eshaaz | Handmade Clothing"));
}

#[test]
fn unresolved_bindings_keep_authored_values() {
    let mut dom = fixture_page();
    let mut value = fixture_document().as_value().clone();
    value["hero"].as_object_mut().unwrap().remove("subtitle");
    value["hero"]["image"] = serde_json::Value::Null;
    let document = ContentDocument::from_value(value).unwrap();

    let report = bind(&mut dom, &document);

    let paths = report.unresolved.iter().map(|binding| binding.path.as_str()).collect::<Vec<_>>();
    assert_eq!(paths, vec!["hero.subtitle", "hero.image"]);
    let subtitle = dom.first_with_attribute_value("data-content", "hero.subtitle").unwrap();
    assert_eq!(dom.text_content(subtitle), "Fallback subtitle");
    let image = dom.first_with_attribute_value("data-src", "hero.image").unwrap();
    assert_eq!(dom.attribute(image, "src"), Some("img/placeholder.jpg"));
    assert_eq!(dom.attribute(image, "alt"), Some("Embroidered kameez"));
}

#[test]
fn list_sections_regenerate_in_order() {
    let mut dom = fixture_page();
    let document = fixture_document();
    let report = bind(&mut dom, &document);

    assert_eq!(report.section_outcome(ListSection::Navigation), Some(SectionOutcome::Rendered { items: 4 }));
    assert_eq!(report.section_outcome(ListSection::Products), Some(SectionOutcome::Rendered { items: 3 }));
    assert_eq!(report.rendered_sections(), 6);

    let nav = section_children(&dom, ListSection::Navigation);
    assert_eq!(
        nav[1],
        r##"<li class="nav-item"><a class="nav-link" href="#about">About</a></li>"##
    );
    let about = section_children(&dom, ListSection::About);
    assert_eq!(about, vec![
        r#"<p class="about-text">Started at a kitchen table.</p>"#,
        r#"<p class="about-text">Now stitched by twelve artisans.</p>"#,
    ]);
    let social = section_children(&dom, ListSection::SocialLinks);
    assert_eq!(social.len(), 2);
    assert!(social[0].contains("social-link facebook"));
    assert!(social[1].contains(r#"<i class="fab fa-instagram"></i>"#));

    let prices = dom
        .elements_by_class("product-price")
        .into_iter()
        .map(|node| dom.text_content(node))
        .collect::<Vec<_>>();
    assert_eq!(prices, vec!["৳ 4,500", "৳ 1,250", "৳ 650"]);
    let icons = dom
        .elements_by_class("feature-icon")
        .into_iter()
        .map(|node| outer_html(&dom, node))
        .collect::<Vec<_>>();
    assert_eq!(icons[1], r#"<div class="feature-icon"><i class="fas fa-truck"></i></div>"#);
}

#[test]
fn binding_twice_is_idempotent() {
    let document = fixture_document();
    let mut once = fixture_page();
    bind(&mut once, &document);
    let mut twice = fixture_page();
    bind(&mut twice, &document);
    let second: BindReport = bind(&mut twice, &document);

    assert_eq!(second.rendered_sections(), 6);
    for section in ListSection::ALL {
        assert_eq!(section_children(&once, section), section_children(&twice, section), "{}", section.name());
    }
}

#[test]
fn missing_currency_uses_default_symbol() {
    let mut dom = parse_page(r#"<div id="products-container"></div>"#);
    let document = ContentDocument::from_value(json!({
        "collection": { "products": [ { "name": "A", "price": 100, "image": "a.jpg", "alt": "A", "link": "http://x" } ] }
    }))
    .unwrap();

    bind(&mut dom, &document);

    let price = dom.elements_by_class("product-price")[0];
    assert_eq!(dom.text_content(price), "৳ 100");
    let link = dom.elements_by_class("btn-outline-primary")[0];
    assert_eq!(dom.attribute(link, "href"), Some("http://x"));
    assert_eq!(resolve_path(document.as_value(), "collection.products.0.price"), Some(&json!(100)));
}

#[tokio::test]
async fn load_failure_skips_binding_but_wires_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/data.json")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;
    let settings = SiteSettings::default();
    let client = SiteClient::new(&settings).unwrap();
    let source = ContentSource::parse(&format!("{}/data.json", server.url())).unwrap();
    let mut dom = fixture_page();

    let runtime = PageRuntime::load(&mut dom, &client, &source, &settings).await;

    mock.assert_async().await;
    assert!(!runtime.is_hydrated());
    assert!(runtime.bind_report().is_none());
    let heading = dom.elements_by_tag("h1")[0];
    assert_eq!(dom.text_content(heading), "Welcome");
    assert_eq!(dom.document_title(), Some("Eshaaz"));

    let wiring = runtime.wiring();
    assert!(!wiring.anchors.is_empty());
    assert!(wiring.navbar.is_some());
    assert!(wiring.contact_form.is_some());
    assert_eq!(wiring.reveal.pending().len(), 5);
    assert_eq!(runtime.contact_settings().endpoint, settings.email_endpoint);
}

#[test]
fn required_field_is_invalid_until_filled() {
    let mut dom = fixture_page();
    let runtime = PageRuntime::initialize(&mut dom, Ok(fixture_document()), &SiteSettings::default());
    let form = runtime.wiring().contact_form.unwrap();
    let name = form.field(&dom, "name").unwrap();

    assert!(!runtime.on_field_blur(&mut dom, name));
    assert!(dom.has_class(name, INVALID_CLASS));

    dom.set_field_value(name, "Nadia");
    assert_eq!(runtime.on_field_input(&mut dom, name), Some(true));
    assert!(!dom.has_class(name, INVALID_CLASS));
    assert!(dom.has_class(name, "is-valid"));
}

fn fill_contact_form(dom: &mut DomTree, runtime: &PageRuntime) {
    let form = runtime.wiring().contact_form.unwrap();
    for (field, value) in [
        ("name", "Nadia Rahman"),
        ("email", "nadia@example.com"),
        ("message", "Do you ship the kantha saree to Chittagong?"),
    ] {
        let node = form.field(dom, field).unwrap();
        dom.set_field_value(node, value);
    }
}

#[tokio::test]
async fn successful_submission_shows_notice_and_clears_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/send-email")
        .match_body(Matcher::PartialJson(json!({
            "to": "orders@eshaaz.example",
            "subject": "CONTACT FORM submission by nadia@example.com",
            "name": "Nadia Rahman"
        })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;
    let settings = SiteSettings {
        email_endpoint: format!("{}/api/v1/send-email", server.url()),
        ..SiteSettings::default()
    };
    let client = SiteClient::new(&settings).unwrap();
    let mut dom = fixture_page();
    let runtime = PageRuntime::initialize(&mut dom, Ok(fixture_document()), &settings);
    fill_contact_form(&mut dom, &runtime);

    let outcome = runtime.submit_contact(&mut dom, &client, &Utc::now()).await.unwrap();

    mock.assert_async().await;
    let SubmissionOutcome::Sent { notice } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert!(dom.has_class(notice.node, "alert-success"));
    assert_eq!(dom.elements_by_class(FORM_ALERT_CLASS), vec![notice.node]);
    let form = runtime.wiring().contact_form.unwrap();
    assert_eq!(form.details(&dom), Default::default());
    let button = form.send_button(&dom).unwrap();
    assert!(!dom.has_attribute(button, "disabled"));
}

#[tokio::test]
async fn failed_submission_shows_error_and_keeps_values() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/send-email")
        .with_status(500)
        .with_body(r#"{"error": "SMTP relay unavailable"}"#)
        .create_async()
        .await;
    let settings = SiteSettings {
        email_endpoint: format!("{}/api/v1/send-email", server.url()),
        ..SiteSettings::default()
    };
    let client = SiteClient::new(&settings).unwrap();
    let mut dom = fixture_page();
    let runtime = PageRuntime::initialize(&mut dom, Ok(fixture_document()), &settings);
    fill_contact_form(&mut dom, &runtime);

    let outcome = runtime.submit_contact(&mut dom, &client, &Utc::now()).await.unwrap();

    mock.assert_async().await;
    let SubmissionOutcome::Failed { error, notice } = outcome else {
        panic!("expected the submission to fail");
    };
    assert_eq!(error.to_string(), "SMTP relay unavailable");
    assert!(dom.has_class(notice.node, "alert-danger"));
    let form = runtime.wiring().contact_form.unwrap();
    assert_eq!(form.details(&dom).email, "nadia@example.com");
    assert_eq!(form.details(&dom).name, "Nadia Rahman");
}
