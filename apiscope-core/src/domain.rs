//! Domain entities for Apiscope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static-analysis coverage for one API on one day.
///
/// Snapshot files store one record per API name; the map key is the name.
/// Fields default so a sparse record does not reject the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRecord {
    /// Total number of analyzable lines for the API.
    #[serde(default)]
    pub full_size: u64,
    /// Number of lines covered by the analysis.
    #[serde(default)]
    pub covered_lines: u64,
    /// Link to the API documentation page.
    #[serde(default)]
    pub apidoc: String,
}

/// Runtime usage for one API on one day.
///
/// Usage files store an ordered list; duplicate names are kept as-is and
/// lookups take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// API name, matched against coverage map keys.
    pub api_name: String,
    /// Number of recorded calls. Upstream occasionally emits garbage here,
    /// so the raw value is signed and normalized at read time.
    #[serde(default)]
    pub usage_count: i64,
    /// Number of distinct clients that called the API.
    #[serde(default)]
    pub total_clients: i64,
}

/// Coverage and usage halves of one calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySnapshot {
    /// Per-API coverage records, keyed by API name.
    pub coverage: BTreeMap<String, CoverageRecord>,
    /// Per-API usage records in file order.
    pub usage: Vec<UsageRecord>,
}

impl DailySnapshot {
    /// Whether both halves of the snapshot are empty.
    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty() && self.usage.is_empty()
    }
}

/// Cross-day rollup served on the dashboard landing card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    /// Number of distinct API names seen across the range.
    #[serde(rename = "totalAPIs")]
    pub total_apis: usize,
    /// Mean coverage percentage over every (day, API) coverage sample.
    pub avg_coverage: f64,
    /// Total recorded calls across the range.
    pub total_calls: u64,
}

impl AggregateSummary {
    /// Zero-valued summary for a range that expands to no days.
    pub fn empty() -> Self {
        Self {
            total_apis: 0,
            avg_coverage: 0.0,
            total_calls: 0,
        }
    }
}

/// One day on the coverage trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Day key, `YYYY-MM-DD`.
    pub date: String,
    /// Mean coverage percentage across that day's APIs.
    pub avg_coverage: f64,
}

/// One API on the coverage/usage scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// API name.
    pub name: String,
    /// Coverage percentage, 0 when the record has no analyzable lines.
    pub coverage: f64,
    /// Recorded call count, 0 when no usage record matches.
    pub usage: u64,
}

/// One row of the per-API detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiRow {
    /// API name.
    pub name: String,
    /// Coverage percentage rounded to one decimal place.
    pub coverage_percent: f64,
    /// Recorded call count, 0 when no usage record matches.
    pub usage_count: u64,
    /// Distinct client count, 0 when no usage record matches.
    pub total_clients: u64,
    /// Link to the API documentation page.
    pub apidoc: String,
    /// Total number of analyzable lines.
    pub full_size: u64,
    /// Number of lines covered.
    pub covered_lines: u64,
}
