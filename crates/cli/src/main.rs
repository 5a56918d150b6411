use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde_json::json;
use sitebind_api::{ContentSource, SiteClient};
use sitebind_engine::form::validation::INVALID_CLASS;
use sitebind_engine::form::{ContactDetails, ContactForm, form_fields};
use sitebind_engine::{DomTree, PageDom, PageRuntime, SectionOutcome, SubmissionOutcome, bind, missing_details, outer_html, read_page};
use sitebind_types::{ContentDocument, ListSection};
use sitebind_util::{SiteSettings, redact_sensitive};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fields listed per unresolved binding before truncating.
const MAX_AVAILABLE_FIELDS: usize = 12;

#[derive(Debug, Parser)]
#[command(name = "sitebind", version, about = "Inspect content documents and exercise content-bound pages")]
struct Cli {
    /// Settings file; defaults to the platform config directory.
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a content document and summarise it.
    Inspect {
        /// URL or file path; defaults to the configured content source.
        #[arg(long)]
        content: Option<String>,
    },
    /// Bind a content document into a page and report unresolved bindings.
    Check {
        #[arg(long)]
        content: Option<String>,
        /// Authored HTML page.
        #[arg(long)]
        page: PathBuf,
        /// Print the regenerated markup of one list section (e.g. `products`).
        #[arg(long, value_name = "NAME")]
        section: Option<String>,
    },
    /// Fill the page's contact form and submit it to the email service.
    Contact {
        #[arg(long)]
        page: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        content: Option<String>,
        /// Print the request instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;
    let client = SiteClient::new(&settings)?;

    match cli.command {
        Command::Inspect { content } => run_inspect(&client, &settings, content.as_deref()).await,
        Command::Check { content, page, section } => {
            run_check(&client, &settings, content.as_deref(), &page, section.as_deref()).await
        }
        Command::Contact {
            page,
            name,
            email,
            message,
            content,
            dry_run,
        } => {
            let details = ContactDetails { name, email, message };
            run_contact(&client, &settings, content.as_deref(), &page, &details, dry_run).await
        }
    }
}

fn init_tracing() {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// `RUST_LOG` directives, falling back to `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn load_settings(path: Option<&Path>) -> Result<SiteSettings> {
    let settings = match path {
        Some(path) => SiteSettings::load_from(path)
            .with_context(|| format!("read settings {}", path.display()))?
            .with_env_overrides(),
        None => SiteSettings::load().context("read settings")?,
    };
    Ok(settings)
}

fn content_source(settings: &SiteSettings, content: Option<&str>) -> Result<ContentSource> {
    let text = content.unwrap_or(&settings.content_source);
    ContentSource::parse(text).with_context(|| format!("invalid content source '{text}'"))
}

async fn load_document(client: &SiteClient, settings: &SiteSettings, content: Option<&str>) -> Result<ContentDocument> {
    let source = content_source(settings, content)?;
    client
        .load_content(&source)
        .await
        .with_context(|| format!("load content document from {source}"))
}

async fn run_inspect(client: &SiteClient, settings: &SiteSettings, content: Option<&str>) -> Result<()> {
    let document = load_document(client, settings, content).await?;
    let email_service = document.email_service();
    let count = |items: Option<usize>| items.map_or(json!(null), |count| json!(count));

    let summary = json!({
        "sections": document.sections(),
        "currency": document.currency(),
        "lists": {
            "about": count(document.about_paragraphs().map(|items| items.len())),
            "navigation": count(document.navigation().map(|items| items.len())),
            "products": count(document.products().map(|items| items.len())),
            "features": count(document.features().map(|items| items.len())),
            "footerLinks": count(document.footer_links().map(|items| items.len())),
            "socialPlatforms": document
                .social_media()
                .map(|social| social.platforms().into_iter().map(|(platform, _)| platform.slug()).collect::<Vec<_>>()),
        },
        "emailService": {
            "recipientEmail": email_service.recipient_email.as_deref().map(redact_sensitive),
            "endpoint": email_service.endpoint.as_deref().map(redact_sensitive),
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_check(
    client: &SiteClient,
    settings: &SiteSettings,
    content: Option<&str>,
    page: &Path,
    section: Option<&str>,
) -> Result<()> {
    let document = load_document(client, settings, content).await?;
    let mut dom = read_page(page)?;
    let report = bind(&mut dom, &document);

    for (list, outcome) in &report.sections {
        let status = match outcome {
            SectionOutcome::Rendered { items } => format!("rendered {items} item(s)"),
            SectionOutcome::MissingContainer => "no container in page".to_string(),
            SectionOutcome::MissingData => format!("no array at '{}'; authored content kept", list.source_path()),
        };
        println!("section {:<13} {status}", list.name());
    }
    println!("bindings applied: {}", report.applied);

    if let Some(name) = section {
        print_section(&dom, name)?;
    }

    if report.unresolved.is_empty() {
        return Ok(());
    }
    for binding in &report.unresolved {
        let details = missing_details(&document, &binding.path, MAX_AVAILABLE_FIELDS);
        println!("unresolved: {}", details.message(binding.kind.attribute()));
        println!("  hint: {}", details.suggested_next_step());
    }
    bail!("{} binding(s) did not resolve", report.unresolved.len())
}

fn print_section(dom: &DomTree, name: &str) -> Result<()> {
    let list = ListSection::ALL
        .into_iter()
        .find(|list| list.name() == name)
        .ok_or_else(|| {
            let known = ListSection::ALL.iter().map(|list| list.name()).collect::<Vec<_>>();
            anyhow!("unknown section '{name}'; expected one of: {}", known.join(", "))
        })?;
    let container = sitebind_engine::section_container(dom, list).with_context(|| format!("page has no container for '{name}'"))?;
    println!("{}", outer_html(dom, container));
    Ok(())
}

async fn run_contact(
    client: &SiteClient,
    settings: &SiteSettings,
    content: Option<&str>,
    page: &Path,
    details: &ContactDetails,
    dry_run: bool,
) -> Result<()> {
    let mut dom = read_page(page)?;
    let source = content_source(settings, content)?;
    let loaded = client.load_content(&source).await;
    let runtime = PageRuntime::initialize(&mut dom, loaded, settings);
    let form = runtime
        .wiring()
        .contact_form
        .with_context(|| format!("{} has no #contactForm", page.display()))?;
    form.fill(&mut dom, details);

    if dry_run {
        let Some(pending) = form.begin(&mut dom, runtime.contact_settings(), &Local::now()) else {
            bail!("contact form is invalid: {}", invalid_fields(&dom, &form).join(", "));
        };
        let out = json!({
            "method": "POST",
            "url": redact_sensitive(&pending.endpoint),
            "headers": { "content-type": "application/json" },
            "body": {
                "to": redact_sensitive(&pending.message.to),
                "subject": pending.message.subject,
                "name": pending.message.name,
                "message": pending.message.message,
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let outcome = runtime
        .submit_contact(&mut dom, client, &Local::now())
        .await
        .context("contact form disappeared from the page")?;
    match outcome {
        SubmissionOutcome::Sent { notice } => {
            info!(dismiss_after = ?notice.dismiss_after, "contact message delivered");
            println!("{}", dom.text_content(notice.node).trim());
            Ok(())
        }
        SubmissionOutcome::Failed { error, .. } => Err(error).context("contact submission failed"),
        SubmissionOutcome::Invalid => bail!("contact form is invalid: {}", invalid_fields(&dom, &form).join(", ")),
    }
}

fn invalid_fields(dom: &DomTree, form: &ContactForm) -> Vec<String> {
    form_fields(dom, form.node())
        .into_iter()
        .filter(|field| dom.has_class(*field, INVALID_CLASS))
        .map(|field| dom.attribute(field, "name").unwrap_or("unnamed").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{Layer, Registry};

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        <EnvFilter as Layer<Registry>>::max_level_hint(filter)
    }

    #[test]
    fn log_filter_honours_rust_log() {
        assert_eq!(max_level(&log_filter(Some("debug"))), Some(LevelFilter::DEBUG));
        assert_eq!(max_level(&log_filter(Some("sitebind_api=trace"))), Some(LevelFilter::TRACE));
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(max_level(&log_filter(None)), Some(LevelFilter::INFO));
        assert_eq!(max_level(&log_filter(Some("  "))), Some(LevelFilter::INFO));
    }
}
