//! The `MysfitStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `mysfits-store-sqlite`).
//! Higher layers go through [`MysfitClient`](crate::MysfitClient), which maps
//! backend failures onto the core error taxonomy.

use std::future::Future;

use crate::mysfit::{FilterField, Mysfit};

/// Abstraction over the backing record store.
///
/// The store is the atomicity boundary: `increment_likes` and `set_adopted`
/// must each be a single conditional write on the backend, never a
/// read-modify-write issued from this side.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait MysfitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Scan every record. Order is unspecified.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Mysfit>, Self::Error>> + Send + '_;

  /// Scan records whose `field` equals `value` exactly.
  fn filter<'a>(
    &'a self,
    field: FilterField,
    value: &'a str,
  ) -> impl Future<Output = Result<Vec<Mysfit>, Self::Error>> + Send + 'a;

  /// Point read. Returns `None` if no record has this id.
  fn get_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Mysfit>, Self::Error>> + Send + 'a;

  /// Add one to `likes`. Returns `false` if no record has this id.
  fn increment_likes<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Set `adopted = true`. Returns `false` if no record has this id; an
  /// already-adopted record still counts as matched.
  fn set_adopted<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Insert or replace a whole record. An empty `mysfit_id` is replaced by a
  /// freshly generated one; the stored record is returned.
  fn upsert(
    &self,
    mysfit: Mysfit,
  ) -> impl Future<Output = Result<Mysfit, Self::Error>> + Send + '_;
}
