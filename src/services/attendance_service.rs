// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attendance query service.
//!
//! Handles the read path:
//! 1. Fetch the roster and in-range uploads from Firestore (concurrently)
//! 2. Narrow the roster by role, if requested
//! 3. Run the pure aggregation
//! 4. Memoize monthly reports until an upload for that month arrives

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{
    AttendanceReport, MonthlyAttendance, UploadEvent, User, UserAttendanceDetail, UserRole,
};
use crate::services::attendance;
use crate::services::cache::{AttendanceCache, MonthKey};
use crate::time_utils::month_bounds;
use chrono::NaiveDate;
use std::sync::Arc;

/// Fetches attendance inputs and aggregates them.
#[derive(Clone)]
pub struct AttendanceService {
    db: FirestoreDb,
    cache: AttendanceCache,
}

impl AttendanceService {
    pub fn new(db: FirestoreDb, cache: AttendanceCache) -> Self {
        Self { db, cache }
    }

    pub fn cache(&self) -> &AttendanceCache {
        &self.cache
    }

    /// Attendance for the month containing `anchor`, evaluated on `today`.
    pub async fn monthly(
        &self,
        anchor: NaiveDate,
        today: NaiveDate,
        role: Option<UserRole>,
    ) -> Result<Arc<MonthlyAttendance>> {
        let key = MonthKey::new(anchor, today, role);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(month = %cached.month, ?role, "Monthly attendance cache hit");
            return Ok(cached);
        }

        // Read before the fetch so an upload recorded meanwhile keeps this
        // report out of the cache.
        let generation = self.cache.generation(anchor);

        let (first, last) = month_bounds(anchor);
        let (roster, uploads) = self.load_inputs(first, last, today, role).await?;

        let report = Arc::new(attendance::monthly_attendance(
            &roster, &uploads, anchor, today,
        ));

        tracing::info!(
            month = %report.month,
            ?role,
            users = report.report.total_users,
            working_days = report.report.working_days,
            uploads = uploads.len(),
            "Computed monthly attendance"
        );

        if self.cache.is_enabled()
            && !self.cache.insert_if_current(key, report.clone(), generation)
        {
            tracing::debug!(
                month = %report.month,
                "Month invalidated during computation, not caching"
            );
        }
        Ok(report)
    }

    /// Attendance over `[start, min(end, today)]`.
    pub async fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
        role: Option<UserRole>,
    ) -> Result<AttendanceReport> {
        let (roster, uploads) = self.load_inputs(start, end, today, role).await?;

        tracing::info!(
            %start,
            %end,
            ?role,
            users = roster.len(),
            uploads = uploads.len(),
            "Computing attendance for range"
        );

        Ok(attendance::attendance_for_range(
            &roster, &uploads, start, end, today,
        ))
    }

    /// One user's attendance over `[start, min(end, today)]`.
    pub async fn user_detail(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<UserAttendanceDetail> {
        let (roster, uploads) = self.load_inputs(start, end, today, None).await?;

        attendance::user_attendance_detail(&roster, &uploads, user_id, start, end, today)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Store upload metadata and drop cached reports for its month.
    pub async fn record_upload(&self, upload: &UploadEvent) -> Result<()> {
        self.db.upsert_upload(upload).await?;
        self.cache.invalidate_month(upload.date);

        tracing::info!(
            upload_id = %upload.id,
            author_id = %upload.author_id,
            date = %upload.date,
            mentions = upload.mentioned_user_ids.len(),
            "Recorded upload"
        );
        Ok(())
    }

    /// Roster plus uploads dated in `[start, min(end, today)]`.
    ///
    /// Skips the upload query entirely when that window is empty.
    async fn load_inputs(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
        role: Option<UserRole>,
    ) -> Result<(Vec<User>, Vec<UploadEvent>)> {
        let last = end.min(today);

        let (mut roster, uploads) = if start > last {
            (self.db.list_users().await?, Vec::new())
        } else {
            tokio::try_join!(
                self.db.list_users(),
                self.db.list_uploads_in_range(start, last)
            )?
        };

        if let Some(role) = role {
            roster.retain(|user| user.role == role);
        }

        Ok((roster, uploads))
    }
}
