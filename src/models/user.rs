//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role assigned to a user. Used to narrow the attendance roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
    Student,
}

impl UserRole {
    /// Parse a role from its wire name (`user`, `admin`, `super_admin`, `student`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: String,
    /// Full name, if the user filled in their profile
    #[serde(default)]
    pub full_name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    /// Name shown in attendance views.
    ///
    /// Full name if present, else the local part of the email, else the ID.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local.to_string(),
            _ if !email.is_empty() => email.to_string(),
            _ => self.id.clone(),
        }
    }
}
