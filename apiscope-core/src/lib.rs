#![deny(missing_docs)]
//! Apiscope core library.
//!
//! This crate contains the snapshot aggregation primitives that power the
//! Apiscope dashboard: expanding date ranges, loading per-day coverage and
//! usage snapshots, and rolling them up into summary statistics.

pub mod aggregate;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod store;

pub use aggregate::Aggregator;
pub use calendar::{expand_range, parse_day};
pub use domain::{
    AggregateSummary, ApiRow, CoverageRecord, DailySnapshot, ScatterPoint, TrendPoint, UsageRecord,
};
pub use error::{ApiscopeError, Result};
pub use metrics::{client_count, coverage_percent, find_usage, round_percent, usage_count};
pub use store::{FsSnapshotStore, SnapshotLoader, SnapshotStore};
