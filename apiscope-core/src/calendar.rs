//! Calendar-day range expansion.

use chrono::NaiveDate;

use crate::error::{ApiscopeError, Result};

/// Day-key format shared by snapshot files and query parameters.
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a day key into a civil calendar date.
///
/// Civil dates carry no timezone, so range expansion cannot skip or
/// double-count a day across daylight-saving transitions.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .map_err(|_| ApiscopeError::InvalidDate(value.to_string()))
}

/// Expand an inclusive `start..=end` date pair into ascending day keys.
///
/// Returns an empty vector when `start > end`; that is "no days in range",
/// not an error. Either endpoint failing to parse is an error.
pub fn expand_range(start: &str, end: &str) -> Result<Vec<String>> {
    let mut day = parse_day(start)?;
    let last = parse_day(end)?;

    let mut days = Vec::new();
    while day <= last {
        days.push(day.format(DAY_FORMAT).to_string());
        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }
    Ok(days)
}
