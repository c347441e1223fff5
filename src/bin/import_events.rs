use std::path::PathBuf;

use adapter::{database::connect_database_with, repository::event::EventRepositoryImpl};
use anyhow::{Context, Result};
use api::model::event::CreateEventRequest;
use clap::Parser;
use garde::Validate;
use kernel::repository::event::EventRepository;
use shared::config::DatabaseConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Inserts every event of a JSON array file. Each event is stamped with the
/// current time as its creation time.
#[derive(Parser, Debug)]
#[command(name = "import_events", version, about)]
struct Args {
    /// JSON file holding an array of events
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init()?;

    let args = Args::parse();
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let events: Vec<CreateEventRequest> =
        serde_json::from_str(&raw).context("expected a JSON array of events")?;

    let pool = connect_database_with(&DatabaseConfig::from_env()?);
    let repository = EventRepositoryImpl::new(pool);

    let total = events.len();
    let mut imported = 0;
    for (index, event) in events.into_iter().enumerate() {
        let title = event.title.clone();
        if let Err(e) = event.validate(&()) {
            tracing::warn!(index, %title, error = %e, "skipped invalid event");
            continue;
        }
        match repository.create(event.into()).await {
            Ok(event_id) => {
                imported += 1;
                tracing::info!(index, %event_id, %title, "imported event");
            }
            Err(e) => {
                tracing::error!(index, %title, error.message = %e, "failed to import event");
            }
        }
    }

    tracing::info!(imported, total, "import finished");
    Ok(())
}
