// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived attendance views.
//!
//! Nothing here is persisted; every value is recomputed from the roster
//! and the upload events on each query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Why a user counts as present on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum PresenceKind {
    Uploaded,
    Mentioned,
}

/// Attendance totals for one user over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserAttendanceSummary {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub total_working_days: u32,
    pub present_days: u32,
    pub absent_days: u32,
    /// Rounded half-up, 0 when there are no working days
    pub attendance_percentage: u32,
}

/// A user present on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PresentUser {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub presence: PresenceKind,
}

/// A user absent on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AbsentUser {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
}

/// Presence breakdown for one working day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayAttendanceSummary {
    pub date: NaiveDate,
    pub present: Vec<PresentUser>,
    pub absent: Vec<AbsentUser>,
}

/// Attendance over an arbitrary date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AttendanceReport {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    /// Evaluation day; later dates are never counted
    pub evaluated_on: NaiveDate,
    /// Not sorted by the aggregator; see `sort_by_attendance`
    pub user_attendance: Vec<UserAttendanceSummary>,
    /// Ascending by date
    pub day_attendance: Vec<DayAttendanceSummary>,
    pub total_users: u32,
    pub working_days: u32,
}

/// Attendance for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonthlyAttendance {
    /// "YYYY-MM"
    pub month: String,
    #[serde(flatten)]
    pub report: AttendanceReport,
}

/// Status of one user on one working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserDay {
    pub date: NaiveDate,
    pub status: DayStatus,
    /// Set only when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<PresenceKind>,
}

/// One user's attendance with a per-day calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserAttendanceDetail {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub evaluated_on: NaiveDate,
    pub summary: UserAttendanceSummary,
    /// Ascending by date, working days only
    pub days: Vec<UserDay>,
}
