//! Representation encoder.
//!
//! Every handler renders through [`encode`], parameterised by the [`Format`]
//! resolved once at startup. Output is deterministic for a given payload and
//! format.

use std::str::FromStr;

use mysfits_core::mysfit::Mysfit;
use quick_xml::escape::escape;
use serde_json::{Value, json};
use strum::{Display, EnumString};
use thiserror::Error;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Key the record array is wrapped under in JSON output.
pub const COLLECTION_KEY: &str = "mysfits";

// ─── Format ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Format {
  #[default]
  #[strum(serialize = "JSON")]
  Json,
  #[strum(serialize = "HTML")]
  Html,
  #[strum(serialize = "TEXT")]
  Text,
}

impl Format {
  /// Resolve a configured format name. Unknown names fall back to JSON.
  pub fn resolve(configured: &str) -> Self {
    Self::from_str(configured.trim()).unwrap_or_else(|_| {
      tracing::warn!(
        configured,
        "unknown output format, falling back to {}",
        Self::default()
      );
      Self::default()
    })
  }

  pub fn content_type(self) -> &'static str {
    match self {
      Self::Json => CONTENT_TYPE_JSON,
      Self::Html => CONTENT_TYPE_HTML,
      Self::Text => CONTENT_TYPE_TEXT,
    }
  }
}

// ─── Payload / output ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
  /// A query result; wrapped under [`COLLECTION_KEY`] in JSON.
  Records(&'a [Mysfit]),
  /// A single record; a bare object in JSON.
  Record(&'a Mysfit),
  /// A status or confirmation line. Never wrapped.
  Message(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
  pub body:         String,
  pub content_type: &'static str,
}

#[derive(Debug, Error)]
pub enum EncodeError {
  /// Some records could not be serialised and were left out of `encoded`.
  #[error("{dropped} record(s) could not be encoded")]
  Partial { encoded: Encoded, dropped: usize },
}

pub fn encode(payload: Payload<'_>, format: Format) -> Result<Encoded, EncodeError> {
  let (body, dropped) = match format {
    Format::Json => json_body(payload),
    Format::Html => (html_body(payload), 0),
    Format::Text => (text_body(payload), 0),
  };

  finish(
    Encoded {
      body,
      content_type: format.content_type(),
    },
    dropped,
  )
}

/// A body that lost records is an error, never a quiet success.
fn finish(encoded: Encoded, dropped: usize) -> Result<Encoded, EncodeError> {
  if dropped > 0 {
    return Err(EncodeError::Partial { encoded, dropped });
  }
  Ok(encoded)
}

/// A message rendered as plain text, regardless of configured format.
pub fn plain(message: &str) -> Encoded {
  Encoded {
    body:         message.to_owned(),
    content_type: CONTENT_TYPE_TEXT,
  }
}

// ─── JSON ────────────────────────────────────────────────────────────────────

fn json_body(payload: Payload<'_>) -> (String, usize) {
  let to_value = |m: &Mysfit| serde_json::to_value(m);
  match payload {
    Payload::Records(records) => json_records(records, to_value),
    Payload::Record(m) => match to_value(m) {
      Ok(v) => (v.to_string(), 0),
      Err(e) => {
        tracing::error!(mysfit_id = %m.mysfit_id, error = %e, "dropping unencodable record");
        (Value::Null.to_string(), 1)
      }
    },
    Payload::Message(msg) => (json!({ "message": msg }).to_string(), 0),
  }
}

/// Serialise each record on its own; one that fails is logged and counted,
/// the rest still make it into the body.
fn json_records<F>(records: &[Mysfit], to_value: F) -> (String, usize)
where
  F: Fn(&Mysfit) -> serde_json::Result<Value>,
{
  let mut dropped = 0;
  let values: Vec<Value> = records
    .iter()
    .filter_map(|m| match to_value(m) {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::error!(mysfit_id = %m.mysfit_id, error = %e, "dropping unencodable record");
        dropped += 1;
        None
      }
    })
    .collect();
  (json!({ COLLECTION_KEY: values }).to_string(), dropped)
}

// ─── HTML ────────────────────────────────────────────────────────────────────

const HTML_COLUMNS: [&str; 10] = [
  "", "Id", "Name", "Species", "Age", "Good/Evil", "Law/Chaos", "Likes",
  "Adopted", "Description",
];

fn html_body(payload: Payload<'_>) -> String {
  let inner = match payload {
    Payload::Records(records) => html_table(records),
    Payload::Record(m) => html_table(std::slice::from_ref(m)),
    Payload::Message(msg) => format!("<p>{}</p>\n", escape(msg)),
  };
  format!(
    "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Mysfits</title></head>\n<body>\n{inner}</body>\n</html>\n"
  )
}

fn html_table(records: &[Mysfit]) -> String {
  let mut out = String::from("<table>\n<tr>");
  for col in HTML_COLUMNS {
    out.push_str(&format!("<th>{col}</th>"));
  }
  out.push_str("</tr>\n");

  for m in records {
    let age = m.age.to_string();
    let likes = m.likes.to_string();
    let adopted = if m.adopted { "yes" } else { "no" };
    out.push_str(&format!(
      "<tr><td><img src=\"{}\" alt=\"{}\"></td>",
      escape(m.thumb_image_uri.as_str()),
      escape(m.name.as_str()),
    ));
    for cell in [
      m.mysfit_id.as_str(),
      m.name.as_str(),
      m.species.as_str(),
      age.as_str(),
      m.good_evil.as_ref(),
      m.law_chaos.as_ref(),
      likes.as_str(),
      adopted,
      m.description.as_str(),
    ] {
      out.push_str(&format!("<td>{}</td>", escape(cell)));
    }
    out.push_str("</tr>\n");
  }

  out.push_str("</table>\n");
  out
}

// ─── Text ────────────────────────────────────────────────────────────────────

fn text_body(payload: Payload<'_>) -> String {
  match payload {
    Payload::Records([]) => "No mysfits.\n".to_owned(),
    Payload::Records(records) => records.iter().map(text_line).collect(),
    Payload::Record(m) => text_line(m),
    Payload::Message(msg) => msg.to_owned(),
  }
}

fn text_line(m: &Mysfit) -> String {
  format!(
    "{} the {} ({}), age {}, {}/{}, {} like(s){} [{}]\n",
    m.name,
    m.species,
    m.description,
    m.age,
    m.good_evil,
    m.law_chaos,
    m.likes,
    if m.adopted { ", adopted" } else { "" },
    m.mysfit_id,
  )
}

#[cfg(test)]
mod tests {
  use mysfits_core::mysfit::{GoodEvil, LawChaos};

  use super::*;

  fn sample(id: &str, name: &str) -> Mysfit {
    Mysfit {
      mysfit_id:         id.into(),
      name:              name.into(),
      species:           "Haetae".into(),
      description:       "Guards the gate.".into(),
      age:               47,
      good_evil:         GoodEvil::Good,
      law_chaos:         LawChaos::Lawful,
      thumb_image_uri:   "https://example.com/haetae_thumb.png".into(),
      profile_image_uri: "https://example.com/haetae.png".into(),
      likes:             3,
      adopted:           true,
    }
  }

  #[test]
  fn resolve_is_case_insensitive_and_falls_back_to_json() {
    assert_eq!(Format::resolve("JSON"), Format::Json);
    assert_eq!(Format::resolve("html"), Format::Html);
    assert_eq!(Format::resolve(" Text "), Format::Text);
    assert_eq!(Format::resolve("yaml"), Format::Json);
    assert_eq!(Format::resolve(""), Format::Json);
  }

  #[test]
  fn empty_records_as_json() {
    let out = encode(Payload::Records(&[]), Format::Json).unwrap();
    assert_eq!(out.content_type, CONTENT_TYPE_JSON);
    let v: Value = serde_json::from_str(&out.body).unwrap();
    assert_eq!(v, json!({ "mysfits": [] }));
  }

  #[test]
  fn records_as_json_are_wrapped() {
    let records = [sample("a", "Aria"), sample("b", "Bram")];
    let out = encode(Payload::Records(&records), Format::Json).unwrap();
    let v: Value = serde_json::from_str(&out.body).unwrap();
    let items = v["mysfits"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["mysfitId"], "b");
    assert_eq!(items[0]["goodEvil"], "Good");
  }

  #[test]
  fn single_record_as_json_is_bare() {
    let m = sample("a", "Aria");
    let out = encode(Payload::Record(&m), Format::Json).unwrap();
    let back: Mysfit = serde_json::from_str(&out.body).unwrap();
    assert_eq!(back, m);
  }

  #[test]
  fn message_is_never_wrapped() {
    let json = encode(Payload::Message("ok"), Format::Json).unwrap();
    assert_eq!(
      serde_json::from_str::<Value>(&json.body).unwrap(),
      json!({ "message": "ok" })
    );
    let text = encode(Payload::Message("ok"), Format::Text).unwrap();
    assert_eq!(text.body, "ok");
    assert_eq!(text.content_type, CONTENT_TYPE_TEXT);
    let html = encode(Payload::Message("ok"), Format::Html).unwrap();
    assert!(html.body.contains("<p>ok</p>"));
  }

  #[test]
  fn html_escapes_record_text() {
    let records = [sample("x", "<script>alert(1)</script> & co")];
    let out = encode(Payload::Records(&records), Format::Html).unwrap();
    assert_eq!(out.content_type, CONTENT_TYPE_HTML);
    assert!(!out.body.contains("<script>"));
    assert!(out.body.contains("&lt;script&gt;"));
    assert!(out.body.contains("&amp; co"));
  }

  #[test]
  fn text_has_one_line_per_record() {
    let records = [sample("a", "Aria"), sample("b", "Bram")];
    let out = encode(Payload::Records(&records), Format::Text).unwrap();
    assert_eq!(out.body.lines().count(), 2);
    assert!(out.body.starts_with("Aria the Haetae"));
    assert!(out.body.contains("adopted"));
  }

  #[test]
  fn encoding_is_deterministic() {
    let records = [sample("a", "Aria"), sample("b", "Bram")];
    for format in [Format::Json, Format::Html, Format::Text] {
      let first = encode(Payload::Records(&records), format).unwrap();
      let second = encode(Payload::Records(&records), format).unwrap();
      assert_eq!(first, second, "{format}");
    }
  }

  #[test]
  fn failing_record_is_dropped_and_counted() {
    let records = [sample("a", "Aria"), sample("b", "Bram"), sample("c", "Cleo")];
    let (body, dropped) = json_records(&records, |m| {
      if m.mysfit_id == "b" {
        Err(<serde_json::Error as serde::ser::Error>::custom("unencodable"))
      } else {
        serde_json::to_value(m)
      }
    });

    assert_eq!(dropped, 1);
    let v: Value = serde_json::from_str(&body).unwrap();
    let ids: Vec<&str> = v["mysfits"]
      .as_array()
      .unwrap()
      .iter()
      .map(|m| m["mysfitId"].as_str().unwrap())
      .collect();
    assert_eq!(ids, vec!["a", "c"]);
  }

  #[test]
  fn dropped_records_make_the_encode_partial() {
    let encoded = Encoded {
      body:         r#"{"mysfits":[]}"#.into(),
      content_type: CONTENT_TYPE_JSON,
    };
    assert_eq!(finish(encoded.clone(), 0).unwrap(), encoded);

    match finish(encoded.clone(), 2) {
      Err(EncodeError::Partial { encoded: partial, dropped }) => {
        assert_eq!(dropped, 2);
        assert_eq!(partial, encoded);
      }
      other => panic!("expected a partial encode, got {other:?}"),
    }
  }

  #[test]
  fn plain_ignores_format() {
    let out = plain("Not here");
    assert_eq!(out.body, "Not here");
    assert_eq!(out.content_type, CONTENT_TYPE_TEXT);
  }
}
