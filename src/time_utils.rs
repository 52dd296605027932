// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Which end of a day a date-only input should be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    Start,
    End,
}

/// Parse a date (`YYYY-MM-DD`) or RFC3339 timestamp into UTC.
///
/// Date-only input is pinned to 00:00:00 or 23:59:59 depending on `bound`.
pub fn parse_bound(raw: &str, bound: DayBound) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.contains('T') {
        return DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match bound {
        DayBound::Start => date.and_hms_opt(0, 0, 0)?,
        DayBound::End => date.and_hms_opt(23, 59, 59)?,
    };
    Some(time.and_utc())
}
