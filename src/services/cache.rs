// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory memo of monthly attendance reports.
//!
//! Entries are keyed by (month, evaluation day, role filter) and expire
//! after a fixed TTL. Recording an upload drops every entry for that
//! upload's month and bumps the month's generation, so a report computed
//! from reads taken before the upload is never stored afterwards.

use crate::models::{MonthlyAttendance, UserRole};
use crate::time_utils::month_bounds;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache key for a monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    /// First day of the month
    pub month: NaiveDate,
    pub today: NaiveDate,
    pub role: Option<UserRole>,
}

impl MonthKey {
    pub fn new(anchor: NaiveDate, today: NaiveDate, role: Option<UserRole>) -> Self {
        Self {
            month: month_bounds(anchor).0,
            today,
            role,
        }
    }
}

#[derive(Clone)]
struct CachedReport {
    report: Arc<MonthlyAttendance>,
    inserted_at: Instant,
}

/// Shared monthly report cache.
#[derive(Clone)]
pub struct AttendanceCache {
    entries: Arc<DashMap<MonthKey, CachedReport>>,
    /// Invalidation count per month (first day of month)
    generations: Arc<DashMap<NaiveDate, u64>>,
    ttl: Duration,
}

impl AttendanceCache {
    /// A zero TTL disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            generations: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Return a cached report if it has not expired.
    pub fn get(&self, key: &MonthKey) -> Option<Arc<MonthlyAttendance>> {
        if !self.is_enabled() {
            return None;
        }

        if let Some(entry) = self.entries.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.report.clone());
            }
        }

        // Expired: the read guard above is dropped before removing.
        self.entries
            .remove_if(key, |_, entry| entry.inserted_at.elapsed() >= self.ttl);
        None
    }

    /// Current generation of the month containing `date`.
    ///
    /// Read this before fetching the inputs of a report and pass it to
    /// [`insert_if_current`](Self::insert_if_current).
    pub fn generation(&self, date: NaiveDate) -> u64 {
        let month = month_bounds(date).0;
        self.generations.get(&month).map(|g| *g).unwrap_or(0)
    }

    /// Store a report unconditionally.
    pub fn insert(&self, key: MonthKey, report: Arc<MonthlyAttendance>) {
        if !self.is_enabled() {
            return;
        }
        self.evict_expired();
        self.entries.insert(
            key,
            CachedReport {
                report,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Store a report only if its month has not been invalidated since
    /// `generation` was read. Returns whether the report was stored.
    pub fn insert_if_current(
        &self,
        key: MonthKey,
        report: Arc<MonthlyAttendance>,
        generation: u64,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.evict_expired();

        // The generation shard stays locked across the insert, so an
        // invalidation either sees this entry or makes the check fail.
        let current = self.generations.entry(key.month).or_insert(0);
        if *current != generation {
            return false;
        }
        self.entries.insert(
            key,
            CachedReport {
                report,
                inserted_at: Instant::now(),
            },
        );
        true
    }

    /// Drop every entry for the month containing `date`.
    pub fn invalidate_month(&self, date: NaiveDate) {
        let month = month_bounds(date).0;
        *self.generations.entry(month).or_insert(0) += 1;
        self.entries.retain(|key, _| key.month != month);
    }

    /// Remove expired entries. Keys carry the evaluation day, so entries
    /// from earlier days are never read again and would otherwise linger.
    fn evict_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
