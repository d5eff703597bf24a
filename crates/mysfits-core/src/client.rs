//! [`MysfitClient`]: the record store client used by the request dispatcher.
//!
//! Translates logical queries into [`MysfitStore`] calls and collapses every
//! backend failure into [`Error::StoreUnavailable`]. Nothing is cached: each
//! call is a live round trip to the store.

use std::{str::FromStr, sync::Arc};

use crate::{
  Error, Result,
  mysfit::{FilterField, Mysfit},
  store::MysfitStore,
};

pub struct MysfitClient<S> {
  store: Arc<S>,
}

impl<S> Clone for MysfitClient<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: MysfitStore> MysfitClient<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The wrapped backend.
  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Every record in the store. An empty store is an empty vector.
  pub async fn list_all(&self) -> Result<Vec<Mysfit>> {
    self.store.list_all().await.map_err(|e| unavailable("scan", e))
  }

  /// Records whose indexed `field` equals `value`.
  ///
  /// `field` is validated before the store is touched; anything other than
  /// `GoodEvil` or `LawChaos` fails with [`Error::InvalidFilterField`].
  pub async fn filter(&self, field: &str, value: &str) -> Result<Vec<Mysfit>> {
    let field = FilterField::from_str(field).map_err(|_| {
      tracing::debug!(field, "rejected filter on unindexed field");
      Error::InvalidFilterField(field.to_owned())
    })?;

    self
      .store
      .filter(field, value)
      .await
      .map_err(|e| unavailable("filtered scan", e))
  }

  /// A single record. Ids are not validated here; the store decides whether
  /// one exists.
  pub async fn get_by_id(&self, id: &str) -> Result<Mysfit> {
    self
      .store
      .get_by_id(id)
      .await
      .map_err(|e| unavailable("get", e))?
      .ok_or_else(|| Error::NotFound(id.to_owned()))
  }

  /// Add one like. Issued as a single store-side increment.
  pub async fn increment_likes(&self, id: &str) -> Result<()> {
    let matched = self
      .store
      .increment_likes(id)
      .await
      .map_err(|e| unavailable("increment likes", e))?;
    if !matched {
      return Err(Error::NotFound(id.to_owned()));
    }
    tracing::info!(mysfit_id = id, "like recorded");
    Ok(())
  }

  /// Mark as adopted. Adopting twice is not an error.
  pub async fn set_adopted(&self, id: &str) -> Result<()> {
    let matched = self
      .store
      .set_adopted(id)
      .await
      .map_err(|e| unavailable("set adopted", e))?;
    if !matched {
      return Err(Error::NotFound(id.to_owned()));
    }
    tracing::info!(mysfit_id = id, "adoption recorded");
    Ok(())
  }
}

fn unavailable<E>(operation: &'static str, err: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  tracing::error!(operation, error = %err, "record store call failed");
  Error::StoreUnavailable(Box::new(err))
}
