//! Storage setup and initialization

use anyhow::{Context, Result};
use quill_core::Config;
use quill_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let media = config.media();
    let storage = create_storage(&media)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                media.upload_dir().display()
            )
        })?;
    tracing::info!(
        public_root = %media.public_root.display(),
        upload_subdir = %media.upload_subdir,
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
