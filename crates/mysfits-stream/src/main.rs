//! `enrich`: run one click batch through the enrichment processor.
//!
//! Reads a delivery-stream event (JSON) from a file or stdin and prints the
//! transformation response to stdout. With `--store`, missing click
//! attributes are looked up in a SQLite record store.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use mysfits_store_sqlite::SqliteStore;
use mysfits_stream::{
  EnrichmentProcessor, FirehoseEvent, FirehoseResponse, MysfitLookup, NoLookup,
  StoreLookup,
};
use tokio::io::AsyncReadExt as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Enrich a batch of Mysfits click events")]
struct Cli {
  /// Event file to read; stdin when omitted.
  input: Option<PathBuf>,

  /// SQLite record store used to fill in missing mysfit attributes.
  #[arg(long)]
  store: Option<PathBuf>,

  /// Pretty-print the response.
  #[arg(long)]
  pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays valid JSON.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let raw = match &cli.input {
    Some(path) => tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("failed to read {path:?}"))?,
    None => {
      let mut buf = String::new();
      tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("failed to read stdin")?;
      buf
    }
  };
  let event: FirehoseEvent =
    serde_json::from_str(&raw).context("input is not a delivery-stream event")?;

  let response = match &cli.store {
    Some(path) => {
      let store = SqliteStore::open(path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      run(StoreLookup::new(Arc::new(store)), &event).await
    }
    None => run(NoLookup, &event).await,
  };

  let out = if cli.pretty {
    serde_json::to_string_pretty(&response)?
  } else {
    serde_json::to_string(&response)?
  };
  println!("{out}");
  Ok(())
}

async fn run<L: MysfitLookup>(lookup: L, event: &FirehoseEvent) -> FirehoseResponse {
  EnrichmentProcessor::new(lookup).process_batch(event).await
}
