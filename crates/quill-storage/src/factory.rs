use crate::{LocalStorage, Storage, StorageResult};
use quill_core::MediaConfig;
use std::sync::Arc;

/// Create the storage backend for the configured public asset root.
pub async fn create_storage(config: &MediaConfig) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.public_root.clone(), &config.upload_subdir).await?;

    tracing::info!(
        root = %config.public_root.display(),
        upload_subdir = %config.upload_subdir,
        "Local asset storage ready"
    );

    Ok(Arc::new(storage))
}
