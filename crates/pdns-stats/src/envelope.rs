//! Untyped statistic envelopes.
//!
//! Each element of the statistics array is first read as an envelope:
//! the name, the `type` tag, and the still-opaque `value`. The value is
//! interpreted later, once the tag has selected a decoder.

use serde::{Deserialize, Deserializer};

use crate::error::StatsResult;

/// One element of the PowerDNS statistics array, prior to typed decoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatisticEnvelope {
    /// Statistic name, e.g. `uptime` or `response-by-qtype`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Shape tag, e.g. `StatisticItem`. Empty when absent or `null`.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    /// Shape-dependent payload. `Null` when absent.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Ring capacity, only sent for `RingStatisticItem`.
    #[serde(default)]
    pub size: Option<String>,
}

/// A `null` string reads as empty, the same as an absent one.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a statistics document into its envelopes, in source order.
///
/// Envelopes missing `name` or `type` are kept; they either decode to an
/// unnamed record or are dropped as unrecognized during classification.
pub fn decode_envelopes(body: &[u8]) -> StatsResult<Vec<StatisticEnvelope>> {
    Ok(serde_json::from_slice(body)?)
}
