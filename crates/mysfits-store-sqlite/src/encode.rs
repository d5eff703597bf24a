//! Conversions between [`Mysfit`] and the plain column values stored in
//! SQLite.
//!
//! Alignments are stored as their variant names, which is also the text that
//! filtered queries compare against. Counters are `INTEGER` columns and are
//! range-checked on the way out.

use std::str::FromStr;

use mysfits_core::mysfit::{FilterField, GoodEvil, LawChaos, Mysfit};

use crate::{Error, Result};

// ─── FilterField ──────────────────────────────────────────────────────────────

/// The indexed column behind a filter field. Always a fixed identifier, so it
/// is safe to splice into SQL text.
pub fn filter_column(field: FilterField) -> &'static str {
  match field {
    FilterField::GoodEvil => "good_evil",
    FilterField::LawChaos => "law_chaos",
  }
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// Raw values read directly from a `mysfits` row, in [`COLUMNS`] order.
///
/// [`COLUMNS`]: crate::schema::COLUMNS
pub struct RawMysfit {
  pub mysfit_id:         String,
  pub name:              String,
  pub species:           String,
  pub description:       String,
  pub age:               i64,
  pub good_evil:         String,
  pub law_chaos:         String,
  pub thumb_image_uri:   String,
  pub profile_image_uri: String,
  pub likes:             i64,
  pub adopted:           bool,
}

impl RawMysfit {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      mysfit_id:         row.get(0)?,
      name:              row.get(1)?,
      species:           row.get(2)?,
      description:       row.get(3)?,
      age:               row.get(4)?,
      good_evil:         row.get(5)?,
      law_chaos:         row.get(6)?,
      thumb_image_uri:   row.get(7)?,
      profile_image_uri: row.get(8)?,
      likes:             row.get(9)?,
      adopted:           row.get(10)?,
    })
  }

  pub fn into_mysfit(self) -> Result<Mysfit> {
    let good_evil = GoodEvil::from_str(&self.good_evil).map_err(|_| {
      Error::UnknownAlignment {
        mysfit_id: self.mysfit_id.clone(),
        column:    "good_evil",
        value:     self.good_evil.clone(),
      }
    })?;
    let law_chaos = LawChaos::from_str(&self.law_chaos).map_err(|_| {
      Error::UnknownAlignment {
        mysfit_id: self.mysfit_id.clone(),
        column:    "law_chaos",
        value:     self.law_chaos.clone(),
      }
    })?;
    let age = u32::try_from(self.age).map_err(|_| Error::CounterOutOfRange {
      mysfit_id: self.mysfit_id.clone(),
      column:    "age",
      value:     self.age,
    })?;
    let likes =
      u64::try_from(self.likes).map_err(|_| Error::CounterOutOfRange {
        mysfit_id: self.mysfit_id.clone(),
        column:    "likes",
        value:     self.likes,
      })?;

    Ok(Mysfit {
      mysfit_id: self.mysfit_id,
      name: self.name,
      species: self.species,
      description: self.description,
      age,
      good_evil,
      law_chaos,
      thumb_image_uri: self.thumb_image_uri,
      profile_image_uri: self.profile_image_uri,
      likes,
      adopted: self.adopted,
    })
  }
}
