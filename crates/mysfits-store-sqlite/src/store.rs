//! [`SqliteStore`]: the SQLite implementation of [`MysfitStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use mysfits_core::{
  mysfit::{FilterField, Mysfit},
  store::MysfitStore,
};

use crate::{
  Error, Result,
  encode::{RawMysfit, filter_column},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A mysfit record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// are serialised onto the connection's thread, and each mutation is one
/// `UPDATE` statement, so concurrent likes on the same id cannot be lost.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT {COLUMNS} ...` statement and decode every row.
  async fn select(
    &self,
    sql: String,
    param: Option<String>,
  ) -> Result<Vec<Mysfit>> {
    let raws: Vec<RawMysfit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], RawMysfit::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawMysfit::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMysfit::into_mysfit).collect()
  }

  /// Execute a single-row `UPDATE` keyed by `mysfit_id`; reports whether a
  /// row matched.
  async fn update_one(&self, sql: &'static str, id: &str) -> Result<bool> {
    let id = id.to_owned();
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id])?))
      .await?;
    Ok(changed > 0)
  }
}

// ─── MysfitStore impl ────────────────────────────────────────────────────────

impl MysfitStore for SqliteStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Mysfit>> {
    self
      .select(format!("SELECT {COLUMNS} FROM mysfits"), None)
      .await
  }

  async fn filter(&self, field: FilterField, value: &str) -> Result<Vec<Mysfit>> {
    let column = filter_column(field);
    self
      .select(
        format!("SELECT {COLUMNS} FROM mysfits WHERE {column} = ?1"),
        Some(value.to_owned()),
      )
      .await
  }

  async fn get_by_id(&self, id: &str) -> Result<Option<Mysfit>> {
    let id = id.to_owned();

    let raw: Option<RawMysfit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM mysfits WHERE mysfit_id = ?1"),
              rusqlite::params![id],
              RawMysfit::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMysfit::into_mysfit).transpose()
  }

  async fn increment_likes(&self, id: &str) -> Result<bool> {
    self
      .update_one(
        "UPDATE mysfits SET likes = likes + 1 WHERE mysfit_id = ?1",
        id,
      )
      .await
  }

  async fn set_adopted(&self, id: &str) -> Result<bool> {
    // SQLite counts a matched row as changed even when `adopted` was already 1.
    self
      .update_one("UPDATE mysfits SET adopted = 1 WHERE mysfit_id = ?1", id)
      .await
  }

  async fn upsert(&self, mut mysfit: Mysfit) -> Result<Mysfit> {
    if mysfit.mysfit_id.is_empty() {
      mysfit.mysfit_id = Uuid::new_v4().hyphenated().to_string();
    }
    let likes = i64::try_from(mysfit.likes).map_err(|_| Error::CounterTooLarge {
      column: "likes",
      value:  mysfit.likes,
    })?;

    let row = mysfit.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO mysfits (
             mysfit_id, name, species, description, age,
             good_evil, law_chaos, thumb_image_uri, profile_image_uri,
             likes, adopted
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            row.mysfit_id,
            row.name,
            row.species,
            row.description,
            i64::from(row.age),
            row.good_evil.as_ref(),
            row.law_chaos.as_ref(),
            row.thumb_image_uri,
            row.profile_image_uri,
            likes,
            row.adopted,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(mysfit_id = %mysfit.mysfit_id, "stored mysfit");
    Ok(mysfit)
  }
}
