//! Asset release tied to the lifecycle of owning entities.
//!
//! Best-effort throughout: failures are logged by the manager and never abort the
//! caller's entity update.

use futures::stream::{self, StreamExt};
use quill_core::{AssetList, StoredAsset};
use std::sync::Arc;

use crate::MediaAssetManager;

const RELEASE_CONCURRENCY: usize = 8;

/// Releases files when an entity is deleted or replaces one of its assets.
#[derive(Clone)]
pub struct AssetLifecycle {
    manager: Arc<MediaAssetManager>,
}

impl AssetLifecycle {
    pub fn new(manager: Arc<MediaAssetManager>) -> Self {
        Self { manager }
    }

    /// Entity deletion: delete every original of a stored list and its thumbnail.
    /// Returns the number of files removed. A malformed list deletes nothing.
    #[tracing::instrument(skip(self, stored))]
    pub async fn release_all(&self, stored: Option<&str>) -> usize {
        let paths = AssetList::parse(stored);
        if paths.is_empty() {
            return 0;
        }

        let removed: usize = stream::iter(paths)
            .map(|path| {
                let manager = self.manager.clone();
                async move { manager.delete_with_thumbnail(&path).await }
            })
            .buffer_unordered(RELEASE_CONCURRENCY)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .sum();

        tracing::info!(files_removed = removed, "Released entity assets");
        removed
    }

    /// Single-asset entity deletion (comment voice file, message image, avatar).
    pub async fn release(&self, path: Option<&str>) -> usize {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => self.manager.delete_with_thumbnail(path).await,
            None => 0,
        }
    }

    /// Swap an entity's asset for a newly stored one, releasing the previous files.
    pub async fn replace(&self, previous: Option<&str>, new: StoredAsset) -> StoredAsset {
        if let Some(previous) = previous.filter(|p| *p != new.original_path) {
            let removed = self.release(Some(previous)).await;
            tracing::debug!(
                previous = %previous,
                files_removed = removed,
                "Released replaced asset"
            );
        }
        new
    }
}
