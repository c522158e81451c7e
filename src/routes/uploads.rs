// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upload metadata ingestion.
//!
//! The photo itself is stored elsewhere; this route records which user
//! uploaded work for which day and whom they credited.

use crate::error::{AppError, Result};
use crate::models::UploadEvent;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const MAX_ID_LEN: usize = 128;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/uploads", post(create_upload))
}

/// Upload metadata submitted by the upload form.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadRequest {
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    #[validate(length(min = 1, max = 128))]
    pub author_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub mentioned_user_ids: Vec<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub photo_url: Option<String>,
}

impl UploadRequest {
    /// Validate field limits and that the work day is not in the future.
    fn check(&self, today: NaiveDate) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if self
            .mentioned_user_ids
            .iter()
            .any(|id| id.is_empty() || id.len() > MAX_ID_LEN)
        {
            return Err(AppError::BadRequest(
                "Invalid user id in 'mentioned_user_ids'".to_string(),
            ));
        }

        if self.date > today {
            return Err(AppError::BadRequest(format!(
                "Upload date {} is in the future",
                self.date
            )));
        }

        Ok(())
    }

    fn into_event(self, created_at: String) -> UploadEvent {
        let mut event = UploadEvent {
            id: self.id,
            author_id: self.author_id,
            date: self.date,
            mentioned_user_ids: self.mentioned_user_ids,
            description: self.description,
            photo_url: self.photo_url,
            created_at,
        };
        event.normalize_mentions();
        event
    }
}

/// Record upload metadata. Re-posting the same id overwrites it.
async fn create_upload(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<UploadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UploadEvent>)> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    request.check(state.today())?;

    let event = request.into_event(format_utc_rfc3339(chrono::Utc::now()));
    state.attendance.record_upload(&event).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> UploadRequest {
        UploadRequest {
            id: "up-1".to_string(),
            author_id: "alice".to_string(),
            date: ymd(2024, 3, 4),
            mentioned_user_ids: vec!["bob".to_string()],
            description: Some("Wired the lab".to_string()),
            photo_url: Some("https://files.example.com/up-1.jpg".to_string()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().check(ymd(2024, 3, 4)).is_ok());
    }

    #[test]
    fn test_future_date_rejected() {
        let err = request().check(ymd(2024, 3, 3)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_field_limits() {
        let mut req = request();
        req.author_id = String::new();
        assert!(req.check(ymd(2024, 3, 4)).is_err());

        let mut req = request();
        req.mentioned_user_ids = (0..51).map(|i| format!("user-{}", i)).collect();
        assert!(req.check(ymd(2024, 3, 4)).is_err());

        let mut req = request();
        req.mentioned_user_ids = vec![String::new()];
        assert!(req.check(ymd(2024, 3, 4)).is_err());

        let mut req = request();
        req.photo_url = Some("not a url".to_string());
        assert!(req.check(ymd(2024, 3, 4)).is_err());
    }

    #[test]
    fn test_into_event_normalizes_mentions() {
        let mut req = request();
        req.mentioned_user_ids = vec![
            "bob".to_string(),
            "alice".to_string(),
            "bob".to_string(),
        ];

        let event = req.into_event("2024-03-04T10:00:00Z".to_string());

        assert_eq!(event.mentioned_user_ids, vec!["bob"]);
        assert_eq!(event.created_at, "2024-03-04T10:00:00Z");
    }
}
