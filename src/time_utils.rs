// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and the working-day calendar.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc, Weekday};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Saturdays and Sundays are never counted as working days.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Working days from `range_start` to `min(range_end, today)`, inclusive, ascending.
///
/// Returns an empty list when the range is inverted or lies entirely after
/// `today`.
pub fn compute_working_days(
    range_start: NaiveDate,
    range_end: NaiveDate,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let last = range_end.min(today);
    if range_start > last {
        return Vec::new();
    }

    range_start
        .iter_days()
        .take_while(|date| *date <= last)
        .filter(|date| !is_weekend(*date))
        .collect()
}

/// First and last calendar day of the month containing `anchor`.
pub fn month_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// "YYYY-MM" key for the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a month selector: "YYYY-MM" or any "YYYY-MM-DD" inside the month.
///
/// Returns the first day of the month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .ok()?;
    Some(month_bounds(date).0)
}

/// Calendar day of `now` in a fixed UTC offset (minutes east of UTC).
pub fn today_at_offset(now: DateTime<Utc>, offset_minutes: i32) -> NaiveDate {
    (now.naive_utc() + Duration::minutes(i64::from(offset_minutes))).date()
}
