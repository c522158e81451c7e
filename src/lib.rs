// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TSS Tracker: attendance derived from daily work uploads
//!
//! This crate provides the backend API that turns the user roster and the
//! daily upload records into monthly and per-day attendance views.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::AttendanceService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub attendance: AttendanceService,
}

impl AppState {
    /// Evaluation day for attendance queries, in the configured UTC offset.
    pub fn today(&self) -> chrono::NaiveDate {
        time_utils::today_at_offset(
            chrono::Utc::now(),
            self.config.attendance_utc_offset_minutes,
        )
    }
}
