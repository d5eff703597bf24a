//! `GET /`: load-balancer health check. Always plain text.

use axum::{http::StatusCode, response::Response};

use crate::{encode::plain, handlers::encoded_response};

pub fn handler(collection: &str) -> Response {
  encoded_response(
    StatusCode::OK,
    plain(&format!(
      "Nothing here, used for health check. Try /{collection} instead."
    )),
  )
}
