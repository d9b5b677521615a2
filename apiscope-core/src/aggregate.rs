//! Cross-day statistical rollups over daily snapshots.

use std::collections::BTreeSet;

use crate::calendar::{expand_range, parse_day};
use crate::domain::{AggregateSummary, ApiRow, DailySnapshot, ScatterPoint, TrendPoint};
use crate::error::Result;
use crate::metrics::{client_count, coverage_percent, round_percent, usage_count};
use crate::store::{SnapshotLoader, SnapshotStore};

/// Read-only aggregation queries over the snapshot store.
///
/// Every operation re-loads from storage; there is no cache and no shared
/// mutable state, so concurrent requests need no coordination.
pub struct Aggregator<S: SnapshotStore> {
    loader: SnapshotLoader<S>,
}

impl<S: SnapshotStore> Aggregator<S> {
    /// Create an aggregator over the given store.
    pub fn new(store: S) -> Self {
        Self {
            loader: SnapshotLoader::new(store),
        }
    }

    /// Cross-range summary: distinct API count, mean coverage, total calls.
    ///
    /// API names are the union of every day's coverage map. Coverage and
    /// usage contributions are counted independently per day and name: a day
    /// lacking coverage for an API still contributes that API's usage.
    /// A range that expands to zero days yields the zero-valued summary.
    pub fn summary(&self, start: &str, end: &str) -> Result<AggregateSummary> {
        let snapshots = self.load_range(start, end)?;

        let mut names: BTreeSet<String> = BTreeSet::new();
        for (_, snapshot) in &snapshots {
            names.extend(snapshot.coverage.keys().cloned());
        }

        let mut coverage_sum = 0.0;
        let mut coverage_samples = 0usize;
        let mut total_calls = 0u64;
        for (day, snapshot) in &snapshots {
            for name in &names {
                if let Some(record) = snapshot.coverage.get(name) {
                    match coverage_percent(record) {
                        Some(percent) => {
                            coverage_sum += percent;
                            coverage_samples += 1;
                        }
                        None => log::warn!("zero-size coverage record for {name} on {day}"),
                    }
                }
                total_calls += usage_count(&snapshot.usage, name);
            }
        }

        let avg_coverage = if coverage_samples > 0 {
            coverage_sum / coverage_samples as f64
        } else {
            0.0
        };
        Ok(AggregateSummary {
            total_apis: names.len(),
            avg_coverage,
            total_calls,
        })
    }

    /// Coverage/usage scatter pairs for one day.
    ///
    /// One point per API name in the day's coverage map; usage defaults to
    /// 0 when no record matches, and zero-size records plot at 0 coverage.
    pub fn coverage_usage(&self, day: &str) -> Result<Vec<ScatterPoint>> {
        let snapshot = self.load_day(day)?;
        let points = snapshot
            .coverage
            .iter()
            .map(|(name, record)| ScatterPoint {
                name: name.clone(),
                coverage: coverage_percent(record).unwrap_or(0.0),
                usage: usage_count(&snapshot.usage, name),
            })
            .collect();
        Ok(points)
    }

    /// Per-day mean coverage series across a range.
    ///
    /// Days without a computable coverage percentage are omitted entirely,
    /// not zero-filled; a non-empty usage list alone does not qualify a day.
    pub fn coverage_trends(&self, start: &str, end: &str) -> Result<Vec<TrendPoint>> {
        let snapshots = self.load_range(start, end)?;
        let mut points = Vec::new();
        for (day, snapshot) in snapshots {
            let percents: Vec<f64> = snapshot
                .coverage
                .values()
                .filter_map(coverage_percent)
                .collect();
            if percents.is_empty() {
                continue;
            }
            points.push(TrendPoint {
                date: day,
                avg_coverage: percents.iter().sum::<f64>() / percents.len() as f64,
            });
        }
        Ok(points)
    }

    /// Per-API detail rows for one day.
    ///
    /// One row per API name in the day's coverage map; usage fields default
    /// to 0 when no matching usage record exists.
    pub fn api_table(&self, day: &str) -> Result<Vec<ApiRow>> {
        let snapshot = self.load_day(day)?;
        let rows = snapshot
            .coverage
            .iter()
            .map(|(name, record)| ApiRow {
                name: name.clone(),
                coverage_percent: round_percent(coverage_percent(record).unwrap_or(0.0)),
                usage_count: usage_count(&snapshot.usage, name),
                total_clients: client_count(&snapshot.usage, name),
                apidoc: record.apidoc.clone(),
                full_size: record.full_size,
                covered_lines: record.covered_lines,
            })
            .collect();
        Ok(rows)
    }

    fn load_day(&self, day: &str) -> Result<DailySnapshot> {
        parse_day(day)?;
        Ok(self.loader.load(day))
    }

    fn load_range(&self, start: &str, end: &str) -> Result<Vec<(String, DailySnapshot)>> {
        let days = expand_range(start, end)?;
        Ok(days
            .into_iter()
            .map(|day| {
                let snapshot = self.loader.load(&day);
                (day, snapshot)
            })
            .collect())
    }
}
