//! HTTP front end for the Mysfits record store.
//!
//! Every request lands in one dispatcher, which classifies it with
//! [`route::classify`], runs the matching operation through a
//! [`MysfitClient`] and renders the result with [`encode::encode`].

pub mod encode;
pub mod error;
pub mod handlers;
pub mod route;
pub mod seed;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{Query, State},
  http::{Method, Uri},
  response::{IntoResponse, Response},
};
use mysfits_core::{MysfitClient, store::MysfitStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use encode::Format;
use handlers::{collection, health, mutate};
use route::{CollectionQuery, Route, classify};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration. Built once at startup and never mutated.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// `JSON`, `HTML` or `TEXT`; anything else is treated as `JSON`.
  pub format:     String,
  /// First path segment of the collection, e.g. `misfits`.
  pub collection: String,
  pub store_path: PathBuf,
  /// Optional `{"mysfits": [...]}` document loaded into the store at startup.
  pub seed_path:  Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "0.0.0.0".to_string(),
      port:       8088,
      format:     "JSON".to_string(),
      collection: "misfits".to_string(),
      store_path: PathBuf::from("mysfits.db"),
      seed_path:  None,
    }
  }
}

impl ServerConfig {
  pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the dispatcher.
#[derive(Clone)]
pub struct AppState<S> {
  pub client: MysfitClient<S>,
  pub config: Arc<ServerConfig>,
  /// Output format, resolved once from `config.format`.
  pub format: Format,
}

impl<S: MysfitStore> AppState<S> {
  pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
    let format = Format::resolve(&config.format);
    Self {
      client: MysfitClient::new(store),
      config: Arc::new(config),
      format,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`]. All paths go through one fallback handler so
/// that classification stays in [`route::classify`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MysfitStore + Clone + 'static,
{
  Router::new()
    .fallback(dispatch::<S>)
    .with_state(state)
    .layer(TraceLayer::new_for_http())
}

async fn dispatch<S>(
  State(state): State<AppState<S>>,
  method: Method,
  uri: Uri,
) -> Response
where
  S: MysfitStore + Clone + 'static,
{
  let query = match Query::<CollectionQuery>::try_from_uri(&uri) {
    Ok(Query(q)) => q,
    Err(e) => {
      return ApiError::InvalidRequest(format!("malformed query string: {e}"))
        .into_response();
    }
  };

  let route = classify(&method, uri.path(), &query, &state.config.collection);
  tracing::debug!(%method, path = uri.path(), ?route, "classified request");

  let result = match route {
    Route::Health => Ok(health::handler(&state.config.collection)),
    Route::ListAll => collection::list(&state).await,
    Route::Filter { field, value } => {
      collection::filter(&state, &field, &value).await
    }
    Route::GetById(id) => collection::get_one(&state, &id).await,
    Route::Like(id) => mutate::like(&state, &id).await,
    Route::Adopt(id) => mutate::adopt(&state, &id).await,
    Route::BadRequest(reason) => Err(ApiError::InvalidRequest(reason.to_owned())),
    Route::UnknownResource => {
      Err(ApiError::NotFound(format!("no resource at {}", uri.path())))
    }
    Route::MethodNotAllowed => Err(ApiError::MethodNotAllowed(method)),
  };

  result.into_response_or_err()
}

// ─── Helper trait ────────────────────────────────────────────────────────────

trait IntoResponseOrErr {
  fn into_response_or_err(self) -> Response;
}

impl IntoResponseOrErr for Result<Response, ApiError> {
  fn into_response_or_err(self) -> Response {
    match self {
      Ok(r)  => r,
      Err(e) => e.into_response(),
    }
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
