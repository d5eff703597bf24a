//! Initial data loading.
//!
//! A seed document has the same shape as the JSON list response,
//! `{"mysfits": [...]}`, so a saved response can be fed straight back in.

use mysfits_core::{mysfit::Mysfit, store::MysfitStore};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("invalid seed document: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to store seed record {index}: {source}")]
  Store {
    index:  usize,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
  mysfits: Vec<Mysfit>,
}

/// Parse `document` and upsert every record into `store`. Returns the number
/// of records written.
pub async fn seed_from_json<S: MysfitStore>(
  store: &S,
  document: &str,
) -> Result<usize, SeedError> {
  let SeedDocument { mysfits } = serde_json::from_str(document)?;
  let count = mysfits.len();

  for (index, mysfit) in mysfits.into_iter().enumerate() {
    store.upsert(mysfit).await.map_err(|e| SeedError::Store {
      index,
      source: Box::new(e),
    })?;
  }

  tracing::info!(count, "seeded record store");
  Ok(count)
}

#[cfg(test)]
mod tests {
  use mysfits_store_sqlite::SqliteStore;

  use super::*;

  #[tokio::test]
  async fn seeds_every_record() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let doc = r#"{"mysfits": [
      {"mysfitId": "a", "name": "Aria", "species": "Chimera", "age": 4,
       "goodEvil": "Evil", "lawChaos": "Lawful"},
      {"name": "Bram", "species": "Yeti", "age": 90,
       "goodEvil": "Good", "lawChaos": "Chaotic", "likes": 12}
    ]}"#;

    assert_eq!(seed_from_json(&store, doc).await.unwrap(), 2);

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|m| m.mysfit_id == "a"));
    let bram = all.iter().find(|m| m.name == "Bram").unwrap();
    assert!(!bram.mysfit_id.is_empty());
    assert_eq!(bram.likes, 12);
  }

  #[tokio::test]
  async fn rejects_malformed_document() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let err = seed_from_json(&store, r#"{"mysfits": [{"name": 1}]}"#)
      .await
      .unwrap_err();
    assert!(matches!(err, SeedError::Json(_)));
    assert!(store.list_all().await.unwrap().is_empty());
  }
}
