//! Click events in, enriched clicks out.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// One user interaction as read off the stream. Every field is optional on
/// the wire and decodes to an empty string when missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
  pub user_id:   String,
  pub mysfit_id: String,
  pub good_evil: String,
  pub law_chaos: String,
  pub species:   String,
}

impl ClickEvent {
  /// Decode base64 `data` into a click.
  ///
  /// The payload as a whole must be a JSON object; individual fields are
  /// read leniently and keys are matched case-insensitively, so
  /// `mysfitId`, `MysfitId` and `mysfitid` are the same field.
  pub fn decode(data: &str) -> Result<Self> {
    let bytes = STANDARD.decode(data.trim())?;
    match serde_json::from_slice::<Value>(&bytes)? {
      Value::Object(obj) => Ok(Self::from_object(&obj)),
      _ => Err(Error::NotAnObject),
    }
  }

  fn from_object(obj: &Map<String, Value>) -> Self {
    Self {
      user_id:   string_field(obj, "userId"),
      mysfit_id: string_field(obj, "mysfitId"),
      good_evil: string_field(obj, "goodEvil"),
      law_chaos: string_field(obj, "lawChaos"),
      species:   string_field(obj, "species"),
    }
  }
}

fn string_field(obj: &Map<String, Value>, name: &str) -> String {
  let found = obj.iter().find(|(k, _)| k.eq_ignore_ascii_case(name));
  match found {
    Some((_, Value::String(s))) => s.clone(),
    Some((key, other)) => {
      tracing::debug!(field = %key, value = %other, "ignoring non-string click field");
      String::new()
    }
    None => String::new(),
  }
}

/// The record forwarded downstream. Key names are what the analytics side
/// expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichedClick {
  #[serde(rename = "userId")]
  pub user_id:   String,
  #[serde(rename = "mysfitId")]
  pub mysfit_id: String,
  #[serde(rename = "goodevil")]
  pub good_evil: String,
  #[serde(rename = "lawchaos")]
  pub law_chaos: String,
  pub species:   String,
}

impl From<ClickEvent> for EnrichedClick {
  fn from(c: ClickEvent) -> Self {
    Self {
      user_id:   c.user_id,
      mysfit_id: c.mysfit_id,
      good_evil: c.good_evil,
      law_chaos: c.law_chaos,
      species:   c.species,
    }
  }
}

impl EnrichedClick {
  /// Stable JSON text, then standard base64 for the text-only sink.
  pub fn encode(&self) -> Result<String> {
    let json = serde_json::to_string(self)?;
    Ok(STANDARD.encode(json))
  }
}
