// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TSS Tracker Attendance API Server
//!
//! Serves attendance derived from daily work uploads stored in Firestore.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tss_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{AttendanceCache, AttendanceService},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        utc_offset_minutes = config.attendance_utc_offset_minutes,
        cache_ttl_secs = config.attendance_cache_ttl.as_secs(),
        "Starting TSS Tracker attendance API"
    );

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .context("Failed to connect to Firestore")?;

    let cache = AttendanceCache::new(config.attendance_cache_ttl);
    if !cache.is_enabled() {
        tracing::info!("Attendance cache disabled");
    }
    let attendance = AttendanceService::new(db, cache);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        attendance,
    });

    // Build router
    let app = tss_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("tss_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .try_init()?;
    Ok(())
}
