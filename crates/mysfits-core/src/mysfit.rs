//! The mysfit record and the two alignment axes it is indexed on.
//!
//! Records are owned by the backing store. Everything in this module is a
//! value snapshot returned per query; nothing here is mutated in place.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ─── Alignments ──────────────────────────────────────────────────────────────

/// Where a mysfit sits on the good/evil axis.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
pub enum GoodEvil {
  Good,
  Neutral,
  Evil,
}

/// Where a mysfit sits on the lawful/chaotic axis.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
pub enum LawChaos {
  Lawful,
  Neutral,
  Chaotic,
}

// ─── Indexed fields ──────────────────────────────────────────────────────────

/// The only attributes the backing store keeps a secondary index on, and
/// therefore the only ones a filtered query may name.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString,
)]
pub enum FilterField {
  GoodEvil,
  LawChaos,
}

impl FilterField {
  /// The textual value of this field on `mysfit`, as stored and compared.
  pub fn value_of<'a>(&self, mysfit: &'a Mysfit) -> &'a str {
    match self {
      Self::GoodEvil => mysfit.good_evil.as_ref(),
      Self::LawChaos => mysfit.law_chaos.as_ref(),
    }
  }

  /// Exact string equality against the stored textual form.
  pub fn matches(&self, mysfit: &Mysfit, value: &str) -> bool {
    self.value_of(mysfit) == value
  }
}

// ─── Mysfit ──────────────────────────────────────────────────────────────────

/// One creature in the collection.
///
/// `likes` only ever grows and `adopted` only ever moves from `false` to
/// `true`; both transitions are performed by the store, never by editing a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mysfit {
  /// Opaque primary key. Empty only on a record that has not been stored yet.
  #[serde(default)]
  pub mysfit_id:         String,
  pub name:              String,
  pub species:           String,
  #[serde(default)]
  pub description:       String,
  pub age:               u32,
  pub good_evil:         GoodEvil,
  pub law_chaos:         LawChaos,
  #[serde(default)]
  pub thumb_image_uri:   String,
  #[serde(default)]
  pub profile_image_uri: String,
  #[serde(default)]
  pub likes:             u64,
  #[serde(default)]
  pub adopted:           bool,
}
