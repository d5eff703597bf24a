//! `POST /{collection}/{id}/like` and `POST /{collection}/{id}/adopt`.
//!
//! The route has been fully validated before either handler runs, so a
//! malformed path never reaches the store.

use axum::{http::StatusCode, response::Response};
use mysfits_core::store::MysfitStore;

use crate::{
  AppState,
  encode::{Payload, encode},
  error::ApiError,
  handlers::encoded_response,
};

pub async fn like<S>(state: &AppState<S>, id: &str) -> Result<Response, ApiError>
where
  S: MysfitStore + Clone + 'static,
{
  state.client.increment_likes(id).await?;
  confirm(state, &format!("Like recorded for mysfit {id}."))
}

pub async fn adopt<S>(state: &AppState<S>, id: &str) -> Result<Response, ApiError>
where
  S: MysfitStore + Clone + 'static,
{
  state.client.set_adopted(id).await?;
  confirm(state, &format!("Mysfit {id} has been adopted."))
}

fn confirm<S>(state: &AppState<S>, message: &str) -> Result<Response, ApiError> {
  let encoded = encode(Payload::Message(message), state.format)?;
  Ok(encoded_response(StatusCode::OK, encoded))
}
