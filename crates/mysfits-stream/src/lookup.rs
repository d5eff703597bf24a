//! Where missing click attributes come from.

use std::{future::Future, sync::Arc};

use mysfits_core::{MysfitClient, mysfit::Mysfit, store::MysfitStore};

/// Resolves a mysfit id to its current record.
///
/// A lookup never fails a record: errors are logged by the implementation
/// and reported as `None`.
pub trait MysfitLookup: Send + Sync {
  fn lookup<'a>(
    &'a self,
    mysfit_id: &'a str,
  ) -> impl Future<Output = Option<Mysfit>> + Send + 'a;
}

/// Pure projection: clicks are forwarded with whatever fields they carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl MysfitLookup for NoLookup {
  async fn lookup(&self, _mysfit_id: &str) -> Option<Mysfit> { None }
}

/// Looks records up in a [`MysfitStore`].
pub struct StoreLookup<S> {
  client: MysfitClient<S>,
}

impl<S: MysfitStore> StoreLookup<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      client: MysfitClient::new(store),
    }
  }
}

impl<S: MysfitStore> MysfitLookup for StoreLookup<S> {
  async fn lookup(&self, mysfit_id: &str) -> Option<Mysfit> {
    match self.client.get_by_id(mysfit_id).await {
      Ok(m) => Some(m),
      Err(e) => {
        tracing::warn!(mysfit_id, error = %e, "enrichment lookup failed");
        None
      }
    }
  }
}
