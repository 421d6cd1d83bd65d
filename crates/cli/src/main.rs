mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bookdesk_app::modules::books::{BOOK_ID_ATTRIBUTE, DELETE_TARGET, UPDATE_FORM_TARGET};
use bookdesk_http::{ReqwestTransport, Transport};
use bookdesk_kernel::{settings::Settings, Element, Event, EventRegistry, Page, TracingConsole};
use clap::{Parser, Subcommand};

use terminal::{HttpNavigator, TerminalDialogs};

/// Maintain the book catalogue from a terminal.
#[derive(Debug, Parser)]
#[command(name = "bookdesk", version)]
struct Cli {
    /// Backend base URL, overrides the configured one
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Delete a book after confirmation
    Delete {
        book_id: String,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Save the edit form of a book
    Update {
        book_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        publication_date: Option<String>,
    },
}

impl Command {
    fn assume_yes(&self) -> bool {
        matches!(self, Command::Delete { yes: true, .. })
    }

    /// The event a browser would have fired for this action.
    fn into_event(self) -> Event {
        match self {
            Command::Delete { book_id, .. } => Event::click(
                DELETE_TARGET,
                Element::new().with_attribute(BOOK_ID_ATTRIBUTE, book_id),
            ),
            Command::Update {
                book_id,
                title,
                author,
                kind,
                publication_date,
            } => {
                let mut form = Element::new().with_attribute(BOOK_ID_ATTRIBUTE, book_id);
                for (name, value) in [
                    ("title", title),
                    ("author", author),
                    ("kind", kind),
                    ("publication_date", publication_date),
                ] {
                    if let Some(value) = value {
                        form = form.with_field(name, value);
                    }
                }
                Event::submit(UPDATE_FORM_TARGET, form)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookdesk settings")?;
    if let Some(base_url) = cli.base_url {
        settings.backend.base_url = base_url;
    }

    bookdesk_telemetry::init(&settings.telemetry).with_context(|| "failed to initialize logging")?;

    tracing::info!(
        env = ?settings.environment,
        backend = %settings.backend.base_url,
        "bookdesk starting"
    );

    let transport: Arc<dyn Transport> = Arc::new(
        ReqwestTransport::from_settings(&settings.backend)
            .with_context(|| "failed to set up backend transport")?,
    );
    let page = Page::new(
        Arc::new(TerminalDialogs::new(cli.command.assume_yes())),
        Arc::new(HttpNavigator::new(
            transport.clone(),
            settings.backend.listing_path.clone(),
        )),
        Arc::new(TracingConsole),
    );

    let mut registry = EventRegistry::new();
    bookdesk_app::modules::register_all(&mut registry, transport, page, &settings);

    let dispatch = registry.dispatch(&cli.command.into_event()).await;
    for report in &dispatch.reports {
        tracing::info!(handler = report.handler, outcome = ?report.outcome, "handler finished");
    }

    if dispatch.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
