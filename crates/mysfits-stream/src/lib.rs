//! Click-stream enrichment for a Firehose-style transformation hook.
//!
//! The hosting pipeline hands over one batch at a time as a
//! [`FirehoseEvent`]; [`EnrichmentProcessor::process_batch`] answers with one
//! [`TransformedRecord`] per input record, in input order. A record that
//! cannot be transformed is reported as failed on its own and never takes
//! the rest of the batch down with it.

pub mod click;
pub mod error;
pub mod firehose;
pub mod lookup;
pub mod processor;

pub use error::{Error, Result};
pub use firehose::{
  FirehoseEvent, FirehoseRecord, FirehoseResponse, RecordResult, TransformedRecord,
};
pub use lookup::{MysfitLookup, NoLookup, StoreLookup};
pub use processor::EnrichmentProcessor;
