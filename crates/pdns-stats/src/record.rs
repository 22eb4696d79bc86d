//! Typed statistic records and the tag-driven classifier.
//!
//! The `type` tag of each envelope selects exactly one decoder. Unknown
//! tags select none and the envelope is dropped; a malformed number in
//! a recognized record is fatal for the whole document.

use serde_json::Value;
use tracing::{debug, trace};

use crate::envelope::StatisticEnvelope;
use crate::error::{StatsError, StatsResult};

/// The record shapes PowerDNS publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticKind {
    /// `StatisticItem`: a single numeric string.
    Scalar,
    /// `MapStatisticItem`: named sub-counters.
    Map,
    /// `RingStatisticItem`: named sub-counters from a bounded ring buffer.
    Ring,
}

impl StatisticKind {
    /// Map a `type` tag to its shape. `None` for tags this version does not know.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "StatisticItem" => Some(Self::Scalar),
            "MapStatisticItem" => Some(Self::Map),
            "RingStatisticItem" => Some(Self::Ring),
            _ => None,
        }
    }

    /// The wire tag for this shape.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Scalar => "StatisticItem",
            Self::Map => "MapStatisticItem",
            Self::Ring => "RingStatisticItem",
        }
    }
}

/// A single named numeric statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarRecord {
    pub name: String,
    pub value: f64,
}

/// One named sub-counter of a map or ring statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticEntry {
    pub name: String,
    pub value: f64,
}

/// A statistic whose value is a list of named sub-counters.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRecord {
    pub name: String,
    /// Sub-counters in source order.
    pub entries: Vec<StatisticEntry>,
}

/// A bounded ring-buffer statistic. Decoded, never exported.
#[derive(Debug, Clone, PartialEq)]
pub struct RingRecord {
    pub name: String,
    /// Ring capacity as sent by the server; empty when absent.
    pub size: String,
    pub entries: Vec<StatisticEntry>,
}

/// A decoded envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticRecord {
    Scalar(ScalarRecord),
    Map(MapRecord),
    Ring(RingRecord),
}

/// Records partitioned by shape, each list in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedStatistics {
    pub scalars: Vec<ScalarRecord>,
    pub maps: Vec<MapRecord>,
    pub rings: Vec<RingRecord>,
}

impl ClassifiedStatistics {
    /// Total number of records across all shapes.
    pub fn len(&self) -> usize {
        self.scalars.len() + self.maps.len() + self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode one envelope according to its tag.
///
/// Returns `Ok(None)` for unrecognized tags.
pub fn decode_record(envelope: &StatisticEnvelope) -> StatsResult<Option<StatisticRecord>> {
    let Some(kind) = StatisticKind::from_tag(&envelope.kind) else {
        return Ok(None);
    };

    let record = match kind {
        StatisticKind::Scalar => StatisticRecord::Scalar(decode_scalar(envelope)?),
        StatisticKind::Map => StatisticRecord::Map(decode_map(envelope)?),
        StatisticKind::Ring => StatisticRecord::Ring(decode_ring(envelope)?),
    };
    Ok(Some(record))
}

/// Partition envelopes into typed collections.
///
/// Fails on the first malformed value; nothing is returned for the
/// records that decoded before it.
pub fn classify(envelopes: &[StatisticEnvelope]) -> StatsResult<ClassifiedStatistics> {
    let mut classified = ClassifiedStatistics::default();

    for envelope in envelopes {
        match decode_record(envelope)? {
            Some(StatisticRecord::Scalar(r)) => classified.scalars.push(r),
            Some(StatisticRecord::Map(r)) => classified.maps.push(r),
            Some(StatisticRecord::Ring(r)) => classified.rings.push(r),
            None => {
                trace!(
                    name = %envelope.name,
                    tag = %envelope.kind,
                    "skipping unrecognized statistic type"
                );
            }
        }
    }

    Ok(classified)
}

fn decode_scalar(envelope: &StatisticEnvelope) -> StatsResult<ScalarRecord> {
    Ok(ScalarRecord {
        name: envelope.name.clone(),
        value: parse_number(&envelope.name, &envelope.value)?,
    })
}

fn decode_map(envelope: &StatisticEnvelope) -> StatsResult<MapRecord> {
    Ok(MapRecord {
        name: envelope.name.clone(),
        entries: decode_entries(&envelope.name, &envelope.value)?,
    })
}

fn decode_ring(envelope: &StatisticEnvelope) -> StatsResult<RingRecord> {
    Ok(RingRecord {
        name: envelope.name.clone(),
        size: envelope.size.clone().unwrap_or_default(),
        entries: decode_entries(&envelope.name, &envelope.value)?,
    })
}

/// Decode `[{name, value}, ...]`.
///
/// Anything but an array reads as no entries, and an element that is not
/// an object reads as an entry with neither name nor value. Only the
/// number parse is fatal.
fn decode_entries(statistic: &str, value: &Value) -> StatsResult<Vec<StatisticEntry>> {
    let Value::Array(items) = value else {
        if !value.is_null() {
            debug!(%statistic, "statistic value is not a list, treating as empty");
        }
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let value = parse_number(
                &format!("{statistic}/{name}"),
                item.get("value").unwrap_or(&Value::Null),
            )?;
            Ok(StatisticEntry { name, value })
        })
        .collect()
}

/// PowerDNS sends every number as a JSON string.
fn parse_number(statistic: &str, value: &Value) -> StatsResult<f64> {
    let invalid = || StatsError::InvalidNumber {
        statistic: statistic.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::String(s) => s.parse::<f64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
