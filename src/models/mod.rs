// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod attendance;
pub mod upload;
pub mod user;

pub use attendance::{
    AbsentUser, AttendanceReport, DayAttendanceSummary, DayStatus, MonthlyAttendance,
    PresenceKind, PresentUser, UserAttendanceDetail, UserAttendanceSummary, UserDay,
};
pub use upload::UploadEvent;
pub use user::{User, UserRole};
