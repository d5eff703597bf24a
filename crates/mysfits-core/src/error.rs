//! Error types for `mysfits-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("mysfit not found: {0}")]
  NotFound(String),

  #[error("{0:?} is not an indexed field; only GoodEvil and LawChaos can be filtered")]
  InvalidFilterField(String),

  #[error("record store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
