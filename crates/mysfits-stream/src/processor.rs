//! [`EnrichmentProcessor`] turns one batch of raw clicks into one batch of
//! per-record outcomes.

use crate::{
  Result,
  click::{ClickEvent, EnrichedClick},
  firehose::{FirehoseEvent, FirehoseRecord, FirehoseResponse, TransformedRecord},
  lookup::MysfitLookup,
};

pub struct EnrichmentProcessor<L> {
  lookup: L,
}

impl<L: MysfitLookup> EnrichmentProcessor<L> {
  pub fn new(lookup: L) -> Self { Self { lookup } }

  /// Process every record in arrival order. Always returns exactly one
  /// outcome per input record, in the same order.
  pub async fn process_batch(&self, event: &FirehoseEvent) -> FirehoseResponse {
    tracing::info!(
      invocation_id = %event.invocation_id,
      delivery_stream = %event.delivery_stream_arn,
      region = %event.region,
      records = event.records.len(),
      "processing batch"
    );

    let mut records = Vec::with_capacity(event.records.len());
    for record in &event.records {
      records.push(self.process_record(record).await);
    }

    let failed = records
      .iter()
      .filter(|r| r.result != crate::RecordResult::Ok)
      .count();
    tracing::info!(
      invocation_id = %event.invocation_id,
      ok = records.len() - failed,
      failed,
      "batch processed"
    );

    FirehoseResponse { records }
  }

  /// Transform a single record. Infallible: failures become a
  /// `ProcessingFailed` outcome carrying the original data.
  pub async fn process_record(&self, record: &FirehoseRecord) -> TransformedRecord {
    match self.transform(&record.data).await {
      Ok(data) => TransformedRecord::ok(record.record_id.clone(), data),
      Err(e) => {
        tracing::warn!(record_id = %record.record_id, error = %e, "transformation failed");
        TransformedRecord::failed(record.record_id.clone(), record.data.clone())
      }
    }
  }

  async fn transform(&self, data: &str) -> Result<String> {
    let click = ClickEvent::decode(data)?;
    let enriched = self.enrich(click).await;
    tracing::debug!(?enriched, "enriched click");
    enriched.encode()
  }

  /// Fill empty attribute fields from the looked-up record. Fields the click
  /// already carries are kept as sent.
  async fn enrich(&self, click: ClickEvent) -> EnrichedClick {
    let mut enriched = EnrichedClick::from(click);
    let incomplete = enriched.good_evil.is_empty()
      || enriched.law_chaos.is_empty()
      || enriched.species.is_empty();
    if enriched.mysfit_id.is_empty() || !incomplete {
      return enriched;
    }

    let found = self.lookup.lookup(&enriched.mysfit_id).await;
    if let Some(m) = found {
      if enriched.good_evil.is_empty() {
        enriched.good_evil = m.good_evil.to_string();
      }
      if enriched.law_chaos.is_empty() {
        enriched.law_chaos = m.law_chaos.to_string();
      }
      if enriched.species.is_empty() {
        enriched.species = m.species;
      }
    }
    enriched
  }
}
