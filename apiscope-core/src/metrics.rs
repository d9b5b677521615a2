//! Per-API metric resolution.

use crate::domain::{CoverageRecord, UsageRecord};

/// Coverage percentage for one record, `coveredLines / fullSize * 100`.
///
/// Returns `None` when the record has no analyzable lines. Zero-size
/// records are a data-quality defect in upstream snapshots; callers skip
/// them from averages instead of letting a NaN flow into the sums.
pub fn coverage_percent(record: &CoverageRecord) -> Option<f64> {
    if record.full_size == 0 {
        return None;
    }
    Some(record.covered_lines as f64 / record.full_size as f64 * 100.0)
}

/// Round a percentage to one decimal place for table display.
pub fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// First usage record matching the given API name, if any.
///
/// Duplicate names are possible in a day's usage list; first match wins,
/// matching the upstream collector's behavior.
pub fn find_usage<'a>(usage: &'a [UsageRecord], name: &str) -> Option<&'a UsageRecord> {
    usage.iter().find(|record| record.api_name == name)
}

/// Normalized call count for a usage record lookup.
///
/// Absent records and negative counts both normalize to 0.
pub fn usage_count(usage: &[UsageRecord], name: &str) -> u64 {
    find_usage(usage, name)
        .map(|record| record.usage_count.max(0) as u64)
        .unwrap_or(0)
}

/// Normalized distinct-client count for a usage record lookup.
pub fn client_count(usage: &[UsageRecord], name: &str) -> u64 {
    find_usage(usage, name)
        .map(|record| record.total_clients.max(0) as u64)
        .unwrap_or(0)
}
