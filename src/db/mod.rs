//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Daily work upload metadata (keyed by upload id)
    pub const UPLOADS: &str = "uploads";
}
