// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily work upload model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A daily work upload, stored in Firestore.
///
/// Only metadata lives here; the photo itself is kept by the file store
/// and referenced through `photo_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UploadEvent {
    /// Upload ID (also used as document ID)
    pub id: String,
    /// User who uploaded the work
    pub author_id: String,
    /// Work day this upload counts for ("YYYY-MM-DD")
    pub date: NaiveDate,
    /// Co-workers credited for the same day
    #[serde(default)]
    pub mentioned_user_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// When the upload was recorded (RFC3339)
    #[serde(default)]
    pub created_at: String,
}

impl UploadEvent {
    /// Drop duplicate mentions and any mention of the author, keeping first-seen order.
    pub fn normalize_mentions(&mut self) {
        let author = self.author_id.clone();
        let mut seen = std::collections::HashSet::new();
        self.mentioned_user_ids
            .retain(|id| *id != author && seen.insert(id.clone()));
    }
}
