//! mysfits-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), layers
//! `MYSFITS_*` environment variables and the plain `PORT` / `FORMAT`
//! variables on top, opens the SQLite store, optionally seeds it and serves
//! HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use mysfits_server::{AppState, ServerConfig, seed::seed_from_json};
use mysfits_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Mysfits HTTP API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load this `{"mysfits": [...]}` document into the store before serving.
  /// Overrides `seed_path` from the configuration.
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = load_config(&cli)?;
  if cli.seed.is_some() {
    server_cfg.seed_path = cli.seed;
  }

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  if let Some(path) = &server_cfg.seed_path {
    let document = tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("failed to read seed file {path:?}"))?;
    seed_from_json(&store, &document)
      .await
      .with_context(|| format!("failed to seed store from {path:?}"))?;
  }

  let address = server_cfg.bind_address();
  let state = AppState::new(Arc::new(store), server_cfg);
  tracing::info!(
    format = %state.format,
    collection = %state.config.collection,
    "output format resolved"
  );
  let app = mysfits_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// File first, then `MYSFITS_*`, then the bare `PORT` and `FORMAT` variables.
fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
  // `PORT` may be written Go-style as `:8088`.
  let port = std::env::var("PORT")
    .ok()
    .map(|p| p.trim_start_matches(':').to_owned())
    .filter(|p| !p.is_empty());
  let format = std::env::var("FORMAT").ok().filter(|f| !f.is_empty());

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("MYSFITS"))
    .set_override_option("port", port)?
    .set_override_option("format", format)?
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}
