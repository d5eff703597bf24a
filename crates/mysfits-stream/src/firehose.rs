//! The batch envelope exchanged with the delivery stream.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One invocation's worth of records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseEvent {
  #[serde(default)]
  pub invocation_id:       String,
  #[serde(default)]
  pub delivery_stream_arn: String,
  #[serde(default)]
  pub region:              String,
  #[serde(default)]
  pub records:             Vec<FirehoseRecord>,
}

/// One record of a batch. Fields are read leniently so that a single
/// malformed record still deserialises and is reported as failed under its
/// own id, instead of rejecting the whole envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseRecord {
  #[serde(default, deserialize_with = "lenient_string")]
  pub record_id:                     String,
  /// Milliseconds since the epoch.
  #[serde(default, deserialize_with = "lenient_millis")]
  pub approximate_arrival_timestamp: Option<i64>,
  /// Base64 of the raw click payload. Empty when absent or not a string.
  #[serde(default, deserialize_with = "lenient_string")]
  pub data:                          String,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
  Ok(match Value::deserialize(d)? {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => {
      tracing::debug!(value = %other, "ignoring non-string envelope field");
      String::new()
    }
  })
}

fn lenient_millis<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
  Ok(Value::deserialize(d)?.as_i64())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordResult {
  Ok,
  /// The record could not be transformed; the pipeline decides whether to
  /// retry or dead-letter it.
  ProcessingFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedRecord {
  pub record_id: String,
  pub result:    RecordResult,
  /// Base64 payload: the enriched click on success, the untouched input
  /// data on failure.
  pub data:      String,
}

impl TransformedRecord {
  pub fn ok(record_id: String, data: String) -> Self {
    Self {
      record_id,
      result: RecordResult::Ok,
      data,
    }
  }

  pub fn failed(record_id: String, original_data: String) -> Self {
    Self {
      record_id,
      result: RecordResult::ProcessingFailed,
      data: original_data,
    }
  }
}

/// The synchronous reply to a [`FirehoseEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirehoseResponse {
  pub records: Vec<TransformedRecord>,
}
