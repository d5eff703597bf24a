//! Error type for `mysfits-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("unknown {column} value in row {mysfit_id:?}: {value:?}")]
  UnknownAlignment {
    mysfit_id: String,
    column:    &'static str,
    value:     String,
  },

  #[error("counter out of range in row {mysfit_id:?}: {column} = {value}")]
  CounterOutOfRange {
    mysfit_id: String,
    column:    &'static str,
    value:     i64,
  },

  #[error("{column} = {value} does not fit the store's INTEGER column")]
  CounterTooLarge {
    column: &'static str,
    value:  u64,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
