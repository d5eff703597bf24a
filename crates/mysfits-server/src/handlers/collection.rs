//! Read handlers for the collection: list, filter and get-by-id.

use axum::{http::StatusCode, response::Response};
use mysfits_core::store::MysfitStore;

use crate::{
  AppState,
  encode::{Payload, encode},
  error::ApiError,
  handlers::encoded_response,
};

/// `GET /{collection}`
pub async fn list<S>(state: &AppState<S>) -> Result<Response, ApiError>
where
  S: MysfitStore + Clone + 'static,
{
  let mysfits = state.client.list_all().await?;
  tracing::debug!(count = mysfits.len(), "listed mysfits");
  let encoded = encode(Payload::Records(&mysfits), state.format)?;
  Ok(encoded_response(StatusCode::OK, encoded))
}

/// `GET /{collection}?filter=<field>&value=<value>`
pub async fn filter<S>(
  state: &AppState<S>,
  field: &str,
  value: &str,
) -> Result<Response, ApiError>
where
  S: MysfitStore + Clone + 'static,
{
  let mysfits = state.client.filter(field, value).await?;
  tracing::debug!(field, value, count = mysfits.len(), "filtered mysfits");
  let encoded = encode(Payload::Records(&mysfits), state.format)?;
  Ok(encoded_response(StatusCode::OK, encoded))
}

/// `GET /{collection}/{id}`
pub async fn get_one<S>(state: &AppState<S>, id: &str) -> Result<Response, ApiError>
where
  S: MysfitStore + Clone + 'static,
{
  let mysfit = state.client.get_by_id(id).await?;
  let encoded = encode(Payload::Record(&mysfit), state.format)?;
  Ok(encoded_response(StatusCode::OK, encoded))
}
