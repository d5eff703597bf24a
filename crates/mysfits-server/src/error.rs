//! Error types and axum `IntoResponse` implementation.
//!
//! Errors are always rendered as plain text, whatever the configured output
//! format, so they stay readable when the service is serving JSON.

use axum::{
  http::{HeaderValue, Method, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::encode::{CONTENT_TYPE_TEXT, EncodeError};

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  InvalidRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("method {0} not allowed")]
  MethodNotAllowed(Method),

  #[error("service unavailable: the record store could not be reached, try again later")]
  StoreUnavailable(#[source] mysfits_core::Error),

  #[error("failed to encode response: {0}")]
  Encode(#[from] EncodeError),
}

impl From<mysfits_core::Error> for ApiError {
  fn from(e: mysfits_core::Error) -> Self {
    match e {
      mysfits_core::Error::NotFound(id) => {
        ApiError::NotFound(format!("no mysfit with id {id:?}"))
      }
      e @ mysfits_core::Error::InvalidFilterField(_) => {
        ApiError::InvalidRequest(e.to_string())
      }
      e @ mysfits_core::Error::StoreUnavailable(_) => ApiError::StoreUnavailable(e),
    }
  }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::warn!(%status, error = %self, "request failed");
    } else {
      tracing::debug!(%status, error = %self, "request rejected");
    }

    let mut res = (
      status,
      [(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_TEXT))],
      self.to_string(),
    )
      .into_response();
    if let ApiError::MethodNotAllowed(_) = self {
      res
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
    }
    res
  }
}
