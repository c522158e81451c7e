// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod attendance;
pub mod attendance_service;
pub mod cache;

pub use attendance_service::AttendanceService;
pub use cache::{AttendanceCache, MonthKey};
