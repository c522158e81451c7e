// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attendance aggregation.
//!
//! Pure functions that turn a roster and a set of upload events into
//! per-user and per-day attendance views. A user is present on a working
//! day if they uploaded work that day or were mentioned in someone else's
//! upload for that day.
//!
//! Nothing here performs I/O or fails: inverted or future-only ranges
//! simply produce empty results. The evaluation day (`today`) is always
//! passed in, so the same inputs always yield the same output.

use crate::models::{
    AbsentUser, AttendanceReport, DayAttendanceSummary, DayStatus, MonthlyAttendance,
    PresenceKind, PresentUser, UploadEvent, User, UserAttendanceDetail, UserAttendanceSummary,
    UserDay,
};
use crate::time_utils::{compute_working_days, month_bounds, month_key};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Dates on which one user uploaded or was mentioned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPresence {
    pub uploaded_on: BTreeSet<NaiveDate>,
    pub mentioned_on: BTreeSet<NaiveDate>,
}

impl UserPresence {
    /// Presence on `date`; an upload wins over a mention.
    pub fn presence_on(&self, date: NaiveDate) -> Option<PresenceKind> {
        if self.uploaded_on.contains(&date) {
            Some(PresenceKind::Uploaded)
        } else if self.mentioned_on.contains(&date) {
            Some(PresenceKind::Mentioned)
        } else {
            None
        }
    }
}

/// Presence keyed by user ID.
///
/// Contains every user referenced by the events, including IDs that are
/// not on the roster. Those are simply never looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceIndex {
    users: HashMap<String, UserPresence>,
}

impl PresenceIndex {
    pub fn get(&self, user_id: &str) -> Option<&UserPresence> {
        self.users.get(user_id)
    }

    pub fn presence_on(&self, user_id: &str, date: NaiveDate) -> Option<PresenceKind> {
        self.get(user_id).and_then(|p| p.presence_on(date))
    }

    /// Number of distinct users referenced by the events.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Build the presence index from upload events.
///
/// Duplicate uploads and repeated mentions collapse into a single date.
/// An author mentioning themselves counts as an upload only.
pub fn build_presence_index(uploads: &[UploadEvent]) -> PresenceIndex {
    let mut users: HashMap<String, UserPresence> = HashMap::new();

    for upload in uploads {
        users
            .entry(upload.author_id.clone())
            .or_default()
            .uploaded_on
            .insert(upload.date);

        for mentioned in &upload.mentioned_user_ids {
            if *mentioned == upload.author_id {
                continue;
            }
            users
                .entry(mentioned.clone())
                .or_default()
                .mentioned_on
                .insert(upload.date);
        }
    }

    PresenceIndex { users }
}

/// Sorted, de-duplicated copy of a working-day list.
///
/// [`compute_working_days`] already yields this shape; both summaries
/// normalize so caller-built lists give views that agree.
fn normalize_working_days(working_days: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut days = working_days.to_vec();
    days.sort_unstable();
    days.dedup();
    days
}

/// Attendance totals for each roster user.
///
/// The output follows roster order, but callers must not rely on any
/// ordering; use [`sort_by_attendance`] for presentation.
pub fn summarize_users(
    roster: &[User],
    working_days: &[NaiveDate],
    index: &PresenceIndex,
) -> Vec<UserAttendanceSummary> {
    let working_days = normalize_working_days(working_days);
    let total = working_days.len() as u32;

    roster
        .iter()
        .map(|user| {
            let present = index
                .get(&user.id)
                .map(|p| {
                    working_days
                        .iter()
                        .filter(|date| p.presence_on(**date).is_some())
                        .count() as u32
                })
                .unwrap_or(0);

            UserAttendanceSummary {
                user_id: user.id.clone(),
                display_name: user.display_name(),
                email: user.email.clone(),
                total_working_days: total,
                present_days: present,
                absent_days: total - present,
                attendance_percentage: attendance_percentage(present, total),
            }
        })
        .collect()
}

/// Presence breakdown for each working day, in ascending date order.
pub fn summarize_days(
    roster: &[User],
    working_days: &[NaiveDate],
    index: &PresenceIndex,
) -> Vec<DayAttendanceSummary> {
    let days = normalize_working_days(working_days);

    // Resolve display names once rather than per day.
    let names: Vec<String> = roster.iter().map(User::display_name).collect();

    days.into_iter()
        .map(|date| {
            let mut present = Vec::new();
            let mut absent = Vec::new();

            for (user, name) in roster.iter().zip(&names) {
                match index.presence_on(&user.id, date) {
                    Some(presence) => present.push(PresentUser {
                        user_id: user.id.clone(),
                        display_name: name.clone(),
                        email: user.email.clone(),
                        presence,
                    }),
                    None => absent.push(AbsentUser {
                        user_id: user.id.clone(),
                        display_name: name.clone(),
                        email: user.email.clone(),
                    }),
                }
            }

            DayAttendanceSummary {
                date,
                present,
                absent,
            }
        })
        .collect()
}

/// Attendance over `[range_start, min(range_end, today)]`.
///
/// `uploads` need not be pre-filtered: events dated outside the working
/// days are never looked at.
pub fn attendance_for_range(
    roster: &[User],
    uploads: &[UploadEvent],
    range_start: NaiveDate,
    range_end: NaiveDate,
    today: NaiveDate,
) -> AttendanceReport {
    let working_days = compute_working_days(range_start, range_end, today);
    let index = build_presence_index(uploads);

    AttendanceReport {
        range_start,
        range_end,
        evaluated_on: today,
        user_attendance: summarize_users(roster, &working_days, &index),
        day_attendance: summarize_days(roster, &working_days, &index),
        total_users: roster.len() as u32,
        working_days: working_days.len() as u32,
    }
}

/// Attendance for the calendar month containing `month_anchor`.
pub fn monthly_attendance(
    roster: &[User],
    uploads: &[UploadEvent],
    month_anchor: NaiveDate,
    today: NaiveDate,
) -> MonthlyAttendance {
    let (first, last) = month_bounds(month_anchor);
    MonthlyAttendance {
        month: month_key(first),
        report: attendance_for_range(roster, uploads, first, last, today),
    }
}

/// One user's attendance with a per-day calendar.
///
/// Returns `None` if `user_id` is not on the roster.
pub fn user_attendance_detail(
    roster: &[User],
    uploads: &[UploadEvent],
    user_id: &str,
    range_start: NaiveDate,
    range_end: NaiveDate,
    today: NaiveDate,
) -> Option<UserAttendanceDetail> {
    let user = roster.iter().find(|u| u.id == user_id)?;
    let working_days = compute_working_days(range_start, range_end, today);
    let index = build_presence_index(uploads);

    let summary = summarize_users(std::slice::from_ref(user), &working_days, &index)
        .pop()?;

    let days = working_days
        .iter()
        .map(|date| {
            let presence = index.presence_on(&user.id, *date);
            UserDay {
                date: *date,
                status: if presence.is_some() {
                    DayStatus::Present
                } else {
                    DayStatus::Absent
                },
                presence,
            }
        })
        .collect();

    Some(UserAttendanceDetail {
        range_start,
        range_end,
        evaluated_on: today,
        summary,
        days,
    })
}

/// Sort for reports: highest percentage first, then most present days,
/// then by display name and user ID.
pub fn sort_by_attendance(summaries: &mut [UserAttendanceSummary]) {
    summaries.sort_by(|a, b| {
        b.attendance_percentage
            .cmp(&a.attendance_percentage)
            .then_with(|| b.present_days.cmp(&a.present_days))
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}

/// `round(present / total * 100)` with halves rounded up; 0 if `total` is 0.
fn attendance_percentage(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (present, total) = (u64::from(present), u64::from(total));
    ((present * 200 + total) / (total * 2)) as u32
}
