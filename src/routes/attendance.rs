// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attendance query routes.

use crate::error::{AppError, Result};
use crate::models::{AttendanceReport, MonthlyAttendance, UserAttendanceDetail, UserRole};
use crate::services::attendance::sort_by_attendance;
use crate::time_utils::{month_bounds, parse_month};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Longest range accepted by the ranged query, in days (inclusive).
const MAX_RANGE_DAYS: i64 = 366;
const MAX_USER_ID_LEN: usize = 128;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/attendance", get(get_range_attendance))
        .route("/api/attendance/monthly", get(get_monthly_attendance))
        .route("/api/attendance/users/{user_id}", get(get_user_attendance))
}

// ─── Query Parsing ───────────────────────────────────────────

fn parse_date_param(name: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid '{}' parameter: expected YYYY-MM-DD", name))
    })
}

/// Month anchor from `?month=`, defaulting to the current month.
fn parse_month_param(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match raw {
        None => Ok(month_bounds(today).0),
        Some(raw) => parse_month(raw).ok_or_else(|| {
            AppError::BadRequest("Invalid 'month' parameter: expected YYYY-MM".to_string())
        }),
    }
}

fn parse_role_param(raw: Option<&str>) -> Result<Option<UserRole>> {
    raw.map(|raw| {
        UserRole::parse(raw.trim()).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid 'role' parameter: expected user, admin, super_admin or student"
                    .to_string(),
            )
        })
    })
    .transpose()
}

// ─── Monthly ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct MonthlyQuery {
    /// "YYYY-MM" (or any date inside the month)
    month: Option<String>,
    role: Option<String>,
}

/// Monthly attendance, users sorted by attendance.
async fn get_monthly_attendance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyQuery>,
) -> Result<Json<MonthlyAttendance>> {
    let today = state.today();
    let anchor = parse_month_param(params.month.as_deref(), today)?;
    let role = parse_role_param(params.role.as_deref())?;

    tracing::debug!(%anchor, %today, ?role, "Fetching monthly attendance");

    let report = state.attendance.monthly(anchor, today, role).await?;
    let mut report = MonthlyAttendance::clone(&report);
    sort_by_attendance(&mut report.report.user_attendance);

    Ok(Json(report))
}

// ─── Arbitrary Range ─────────────────────────────────────────

#[derive(Deserialize)]
struct RangeQuery {
    start: Option<String>,
    end: Option<String>,
    role: Option<String>,
}

/// Attendance over an explicit date range.
///
/// An inverted range yields an empty report rather than an error.
async fn get_range_attendance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<AttendanceReport>> {
    let start = params
        .start
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing 'start' parameter".to_string()))
        .and_then(|raw| parse_date_param("start", raw))?;
    let end = params
        .end
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing 'end' parameter".to_string()))
        .and_then(|raw| parse_date_param("end", raw))?;
    let role = parse_role_param(params.role.as_deref())?;

    if (end - start).num_days() >= MAX_RANGE_DAYS {
        return Err(AppError::BadRequest(format!(
            "Range too long: at most {} days",
            MAX_RANGE_DAYS
        )));
    }

    let today = state.today();
    let mut report = state.attendance.range(start, end, today, role).await?;
    sort_by_attendance(&mut report.user_attendance);

    Ok(Json(report))
}

// ─── Single User ─────────────────────────────────────────────

#[derive(Deserialize)]
struct UserMonthQuery {
    month: Option<String>,
}

/// One user's attendance calendar for a month.
async fn get_user_attendance(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<UserMonthQuery>,
) -> Result<Json<UserAttendanceDetail>> {
    if user_id.is_empty() || user_id.len() > MAX_USER_ID_LEN {
        return Err(AppError::BadRequest("Invalid user id".to_string()));
    }

    let today = state.today();
    let anchor = parse_month_param(params.month.as_deref(), today)?;
    let (first, last) = month_bounds(anchor);

    let detail = state
        .attendance
        .user_detail(&user_id, first, last, today)
        .await?;

    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_param_defaults_to_current_month() {
        let anchor = parse_month_param(None, ymd(2024, 3, 19)).unwrap();
        assert_eq!(anchor, ymd(2024, 3, 1));
    }

    #[test]
    fn test_month_param_rejects_garbage() {
        let err = parse_month_param(Some("last-month"), ymd(2024, 3, 19)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_role_param() {
        assert_eq!(parse_role_param(None).unwrap(), None);
        assert_eq!(
            parse_role_param(Some("student")).unwrap(),
            Some(UserRole::Student)
        );
        assert!(parse_role_param(Some("guest")).is_err());
    }

    #[test]
    fn test_date_param() {
        assert_eq!(parse_date_param("start", "2024-03-04").unwrap(), ymd(2024, 3, 4));
        assert!(parse_date_param("start", "04/03/2024").is_err());
    }
}
