//! Flattening of typed records into output metrics.

use std::fmt;

use crate::naming::{map_help, map_metric_name, scalar_help, scalar_metric_name};
use crate::record::ClassifiedStatistics;

/// Semantic type of an exported metric.
///
/// Every PowerDNS statistic is exported as a counter, including the few
/// that can go down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
}

impl MetricKind {
    /// The Prometheus `# TYPE` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sample handed to the collector.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputMetric {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub value: f64,
}

/// Emit one metric per scalar record and one per map entry.
///
/// Scalars come first in source order, then map entries in source order.
/// Ring records produce nothing.
pub fn emit(statistics: &ClassifiedStatistics) -> Vec<OutputMetric> {
    let map_entries: usize = statistics.maps.iter().map(|m| m.entries.len()).sum();
    let mut metrics = Vec::with_capacity(statistics.scalars.len() + map_entries);

    for scalar in &statistics.scalars {
        metrics.push(OutputMetric {
            name: scalar_metric_name(&scalar.name),
            help: scalar_help(&scalar.name),
            kind: MetricKind::Counter,
            value: scalar.value,
        });
    }

    for map in &statistics.maps {
        for entry in &map.entries {
            metrics.push(OutputMetric {
                name: map_metric_name(&map.name, &entry.name),
                help: map_help(&map.name, &entry.name),
                kind: MetricKind::Counter,
                value: entry.value,
            });
        }
    }

    metrics
}
