//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use quill_core::Config;
use quill_media::MediaAssetManager;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = build_state(config.clone()).await?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Storage, media manager and lifecycle helpers for a validated configuration.
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    crate::error::configure_error_details(&config);

    let storage = storage::setup_storage(&config).await?;
    let media = Arc::new(MediaAssetManager::new(storage, config.media()));
    Ok(Arc::new(AppState::new(config, media)))
}
