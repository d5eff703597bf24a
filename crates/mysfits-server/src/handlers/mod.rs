//! Per-operation handlers and the shared response builder.

pub mod collection;
pub mod health;
pub mod mutate;

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};

use crate::encode::Encoded;

pub(super) fn encoded_response(status: StatusCode, encoded: Encoded) -> Response {
  (
    status,
    [(
      header::CONTENT_TYPE,
      HeaderValue::from_static(encoded.content_type),
    )],
    encoded.body,
  )
    .into_response()
}
