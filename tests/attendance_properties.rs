// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Invariant checks over a larger synthetic dataset.
//!
//! Uploads are generated deterministically so failures are reproducible.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use tss_tracker::models::{UploadEvent, User};
use tss_tracker::services::attendance::{attendance_for_range, monthly_attendance};

mod common;
use common::{upload, user, ymd};

const ROSTER_SIZE: usize = 12;

/// Small linear congruential generator; good enough to scatter test data.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn roster() -> Vec<User> {
    (0..ROSTER_SIZE).map(|i| user(&format!("user-{}", i))).collect()
}

/// Uploads spread over Feb..Apr 2024, including weekends, duplicates,
/// self-mentions and mentions of users outside the roster.
fn uploads(seed: u64) -> Vec<UploadEvent> {
    let mut rng = Lcg(seed);
    let start = ymd(2024, 2, 1);
    let mut events = Vec::new();

    for n in 0..400 {
        let date = start + chrono::Duration::days(rng.below(90) as i64);
        let author = format!("user-{}", rng.below(ROSTER_SIZE as u64 + 3));
        let mentions: Vec<String> = (0..rng.below(3))
            .map(|_| format!("user-{}", rng.below(ROSTER_SIZE as u64 + 5)))
            .collect();
        let mention_refs: Vec<&str> = mentions.iter().map(String::as_str).collect();
        events.push(upload(&format!("up-{}", n), &author, date, &mention_refs));
    }
    events
}

#[test]
fn test_present_plus_absent_equals_total() {
    let roster = roster();
    let uploads = uploads(7);

    for today in [ymd(2024, 2, 15), ymd(2024, 3, 10), ymd(2024, 4, 30)] {
        let report = monthly_attendance(&roster, &uploads, ymd(2024, 3, 1), today);
        for s in &report.report.user_attendance {
            assert_eq!(
                s.present_days + s.absent_days,
                s.total_working_days,
                "invariant broken for {}",
                s.user_id
            );
            assert_eq!(s.total_working_days, report.report.working_days);
            assert!(s.attendance_percentage <= 100);
        }
    }
}

#[test]
fn test_no_weekend_or_future_days() {
    let roster = roster();
    let uploads = uploads(11);
    let today = ymd(2024, 3, 13);

    let report = attendance_for_range(&roster, &uploads, ymd(2024, 2, 1), ymd(2024, 4, 30), today);

    assert_eq!(report.day_attendance.len() as u32, report.working_days);
    for day in &report.day_attendance {
        assert!(!matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun));
        assert!(day.date <= today);
    }
}

#[test]
fn test_day_summaries_ascending_and_partition_roster() {
    let roster = roster();
    let uploads = uploads(23);

    let report = attendance_for_range(&roster, &uploads, ymd(2024, 2, 1), ymd(2024, 4, 30), ymd(2024, 12, 31));

    let dates: Vec<NaiveDate> = report.day_attendance.iter().map(|d| d.date).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));

    let roster_ids: HashSet<&str> = roster.iter().map(|u| u.id.as_str()).collect();
    for day in &report.day_attendance {
        assert_eq!(day.present.len() + day.absent.len(), roster.len());

        let mut seen = HashSet::new();
        for id in day
            .present
            .iter()
            .map(|p| p.user_id.as_str())
            .chain(day.absent.iter().map(|a| a.user_id.as_str()))
        {
            assert!(roster_ids.contains(id), "phantom user {}", id);
            assert!(seen.insert(id), "user {} listed twice", id);
        }
    }
}

#[test]
fn test_user_and_day_views_agree() {
    let roster = roster();
    let uploads = uploads(42);

    let report = attendance_for_range(&roster, &uploads, ymd(2024, 3, 1), ymd(2024, 3, 31), ymd(2024, 12, 31));

    for s in &report.user_attendance {
        let from_days = report
            .day_attendance
            .iter()
            .filter(|d| d.present.iter().any(|p| p.user_id == s.user_id))
            .count() as u32;
        assert_eq!(from_days, s.present_days, "mismatch for {}", s.user_id);
    }
}

#[test]
fn test_same_inputs_same_output() {
    let roster = roster();
    let uploads = uploads(99);
    let today = ymd(2024, 3, 20);

    let first = monthly_attendance(&roster, &uploads, ymd(2024, 3, 5), today);
    let second = monthly_attendance(&roster, &uploads, ymd(2024, 3, 5), today);

    assert_eq!(first, second);
}

#[test]
fn test_upload_order_does_not_matter() {
    let roster = roster();
    let uploads = uploads(5);
    let mut reversed = uploads.clone();
    reversed.reverse();
    let today = ymd(2024, 4, 30);

    assert_eq!(
        monthly_attendance(&roster, &uploads, ymd(2024, 3, 1), today),
        monthly_attendance(&roster, &reversed, ymd(2024, 3, 1), today)
    );
}
