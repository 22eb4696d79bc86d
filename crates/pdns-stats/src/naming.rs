//! Metric naming.
//!
//! All functions here are pure: the same statistic always yields the same
//! metric name, with no registry or counter involved.

/// Prefix for metrics derived from `StatisticItem` records.
pub const SCALAR_NAMESPACE: &str = "pdns_auth";

/// Prefix for metrics derived from `MapStatisticItem` entries. Distinct
/// from [`SCALAR_NAMESPACE`] so a map entry cannot shadow a scalar.
pub const MAP_NAMESPACE: &str = "pdns_auth_map";

/// Metric name for a scalar statistic: `pdns_auth_<name>` with dashes
/// turned into underscores.
pub fn scalar_metric_name(name: &str) -> String {
    format!("{SCALAR_NAMESPACE}_{}", name.replace('-', "_"))
}

/// Normalize a map entry name: lower-case, spaces dropped, dashes to
/// underscores. `"A Record"` becomes `"arecord"`.
pub fn map_entry_name(entry: &str) -> String {
    entry.to_lowercase().replace(' ', "").replace('-', "_")
}

/// Metric name for one entry of a map statistic:
/// `pdns_auth_map_<parent>_<entry>`.
pub fn map_metric_name(parent: &str, entry: &str) -> String {
    format!("{MAP_NAMESPACE}_{}", map_statistic_path(parent, entry).replace('-', "_"))
}

/// Help text for a scalar statistic.
pub fn scalar_help(name: &str) -> String {
    format!("See PowerDNS statistic '{name}'.")
}

/// Help text for one entry of a map statistic. Unlike [`scalar_help`]
/// it carries no trailing period.
pub fn map_help(parent: &str, entry: &str) -> String {
    format!("See PowerDNS statistic '{}'", map_statistic_path(parent, entry))
}

fn map_statistic_path(parent: &str, entry: &str) -> String {
    format!("{parent}_{}", map_entry_name(entry))
}
