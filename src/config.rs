//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::time::Duration;

/// Largest accepted UTC offset west of Greenwich (UTC-12:00).
const MIN_UTC_OFFSET_MINUTES: i32 = -12 * 60;
/// Largest accepted UTC offset east of Greenwich (UTC+14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// UTC offset (minutes east) used to decide which calendar day is "today"
    pub attendance_utc_offset_minutes: i32,
    /// How long monthly reports stay cached; zero disables the cache
    pub attendance_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let attendance_utc_offset_minutes = match env::var("ATTENDANCE_UTC_OFFSET_MINUTES") {
            Ok(raw) => parse_utc_offset(&raw)?,
            Err(_) => 0,
        };

        let attendance_cache_ttl = match env::var("ATTENDANCE_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid("ATTENDANCE_CACHE_TTL_SECS", raw))?,
            Err(_) => Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            attendance_utc_offset_minutes,
            attendance_cache_ttl,
        })
    }

    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            attendance_utc_offset_minutes: 0,
            attendance_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

fn parse_utc_offset(raw: &str) -> Result<i32, ConfigError> {
    let invalid = || ConfigError::Invalid("ATTENDANCE_UTC_OFFSET_MINUTES", raw.to_string());
    let minutes = raw.trim().parse::<i32>().map_err(|_| invalid())?;
    if !(MIN_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
        return Err(invalid());
    }
    Ok(minutes)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
