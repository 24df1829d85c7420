//! Filterbar event replay.
//!
//! Feeds a catalog and a scripted list of toolbar events through a
//! [`Toolbar`] and prints every store write as one JSON line on stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filterbar_core::hierarchy::RawCatalog;
use filterbar_core::{RecordingStore, SystemClock, Toolbar, ToolbarEvent};
use filterbar_shared::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "filterbar", version, about = "Replay filter toolbar events")]
struct Args {
    /// Catalog JSON: tier -> parent uid -> items.
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Event script JSON: an array of toolbar events.
    #[arg(long, value_name = "FILE")]
    events: PathBuf,

    /// Configuration file (defaults to config/{default,RUN_MODE}.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(&config.logging.filter, args.json_logs);

    let tz = config.locale.tz()?;
    let catalog: RawCatalog = read_json(&args.catalog)?;
    let events: Vec<ToolbarEvent> = read_json(&args.events)?;
    info!(
        timezone = %tz,
        events = events.len(),
        "Replaying toolbar events"
    );

    let mut toolbar = Toolbar::new(
        config.toolbar,
        Arc::new(SystemClock),
        tz,
        RecordingStore::new(),
    );
    toolbar.set_catalog(&catalog);
    print_writes(&mut toolbar)?;

    for event in events {
        toolbar.dispatch(event);
        print_writes(&mut toolbar)?;
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(default_filter: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_writes(toolbar: &mut Toolbar<RecordingStore>) -> anyhow::Result<()> {
    for write in toolbar.store_mut().take_events() {
        println!("{}", serde_json::to_string(&write)?);
    }
    Ok(())
}
