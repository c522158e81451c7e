// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use std::sync::Arc;
use tss_tracker::config::Config;
use tss_tracker::db::FirestoreDb;
use tss_tracker::models::{UploadEvent, User, UserRole};
use tss_tracker::routes::create_router;
use tss_tracker::services::{AttendanceCache, AttendanceService};
use tss_tracker::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build shared state around a database handle.
#[allow(dead_code)]
pub fn test_state(db: FirestoreDb) -> Arc<AppState> {
    let config = Config::test_default();
    let cache = AttendanceCache::new(config.attendance_cache_ttl);
    let attendance = AttendanceService::new(db, cache);

    Arc::new(AppState { config, attendance })
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = test_state(FirestoreDb::new_mock());
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Roster user with an email-derived display name.
#[allow(dead_code)]
pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        full_name: None,
        email: format!("{}@example.com", id),
        role: UserRole::User,
    }
}

#[allow(dead_code)]
pub fn upload(id: &str, author: &str, date: NaiveDate, mentions: &[&str]) -> UploadEvent {
    UploadEvent {
        id: id.to_string(),
        author_id: author.to_string(),
        date,
        mentioned_user_ids: mentions.iter().map(|m| m.to_string()).collect(),
        description: None,
        photo_url: None,
        created_at: "2024-03-04T10:00:00Z".to_string(),
    }
}
