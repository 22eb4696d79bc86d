//! Prometheus text exposition format.
//!
//! Renders output metrics into the text format (version 0.0.4) served on
//! `/metrics`.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::emit::OutputMetric;
use crate::error::{StatsError, StatsResult};

/// Content type of the rendered exposition.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

static METRIC_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("metric name pattern is valid")
});

/// Whether `name` is a legal Prometheus metric name.
pub fn is_valid_metric_name(name: &str) -> bool {
    METRIC_NAME.is_match(name)
}

/// Render metrics into Prometheus text format.
///
/// Each metric gets its own HELP and TYPE header. A name outside the
/// Prometheus grammar, or a name appearing twice, makes the exposition
/// invalid, so it is rejected instead of rendered.
pub fn render_prometheus(metrics: &[OutputMetric]) -> StatsResult<String> {
    let mut seen = HashSet::with_capacity(metrics.len());
    let mut out = String::new();

    for m in metrics {
        if !is_valid_metric_name(&m.name) {
            return Err(StatsError::InvalidMetricName(m.name.clone()));
        }
        if !seen.insert(m.name.as_str()) {
            return Err(StatsError::DuplicateMetric(m.name.clone()));
        }
        // Writing to a String cannot fail.
        let _ = writeln!(out, "# HELP {} {}", m.name, escape_help(&m.help));
        let _ = writeln!(out, "# TYPE {} {}", m.name, m.kind);
        let _ = writeln!(out, "{} {}", m.name, format_value(m.value));
    }

    Ok(out)
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        // `Display` gives the shortest round-trip form and drops a zero fraction.
        value.to_string()
    }
}
