//! pdns-stats — decoding and flattening of PowerDNS statistics.
//!
//! The PowerDNS statistics endpoint returns a single JSON array mixing
//! three record shapes, told apart only by their `type` tag. This crate
//! turns that array into flat, uniquely named Prometheus counters.
//!
//! # Pipeline
//!
//! ```text
//! &[u8]
//!   └── decode_envelopes() → Vec<StatisticEnvelope>
//!         └── classify() → ClassifiedStatistics { scalars, maps, rings }
//!               └── emit() → Vec<OutputMetric>
//!                     └── render_prometheus() → text/plain exposition
//! ```
//!
//! Malformed numbers abort the whole cycle. Unknown `type` tags are
//! dropped without error so that newer PowerDNS releases keep working.

pub mod emit;
pub mod envelope;
pub mod error;
pub mod exposition;
pub mod naming;
pub mod record;

pub use emit::{MetricKind, OutputMetric, emit};
pub use envelope::{StatisticEnvelope, decode_envelopes};
pub use error::{StatsError, StatsResult};
pub use exposition::{CONTENT_TYPE, is_valid_metric_name, render_prometheus};
pub use record::{
    ClassifiedStatistics, MapRecord, RingRecord, ScalarRecord, StatisticEntry, StatisticKind,
    StatisticRecord, classify, decode_record,
};
