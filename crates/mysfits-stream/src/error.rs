//! Per-record transformation errors.
//!
//! None of these ever escape a batch; they only decide a single record's
//! [`RecordResult`](crate::RecordResult).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record data is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),

  #[error("record data is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("record data is JSON but not an object")]
  NotAnObject,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
