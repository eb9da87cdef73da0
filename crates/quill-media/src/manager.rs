use bytes::Bytes;
use quill_core::constants::ORIGINAL_PREFIX;
use quill_core::{derive_thumbnail_path, extension_or_fallback, AssetKind, MediaConfig, StoredAsset};
use quill_processing::ThumbnailGenerator;
use quill_storage::{asset_key, new_asset_id, Storage};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use crate::error::MediaResult;

/// Persists uploaded originals, derives their thumbnails and deletes asset files.
///
/// Constructed from an explicit [`MediaConfig`]; never reads the environment.
#[derive(Clone)]
pub struct MediaAssetManager {
    storage: Arc<dyn Storage>,
    config: MediaConfig,
    thumbnails: ThumbnailGenerator,
}

impl MediaAssetManager {
    pub fn new(storage: Arc<dyn Storage>, config: MediaConfig) -> Self {
        let thumbnails =
            ThumbnailGenerator::new(config.thumbnail_max_dimension, config.thumbnail_quality);
        Self {
            storage,
            config,
            thumbnails,
        }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Store an image upload as `orig_<id>.<ext>` in `target_dir` and derive its thumbnail.
    ///
    /// `filename` is only used to recover the extension. Returned paths are relative to
    /// the public asset root. A thumbnail failure is logged and leaves
    /// `thumbnail_path == original_path`; only a failure to write the original is an error.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn store(
        &self,
        data: Bytes,
        filename: Option<&str>,
        target_dir: &str,
    ) -> MediaResult<StoredAsset> {
        let id = new_asset_id();
        let extension = extension_or_fallback(filename);
        let original_path = asset_key(target_dir, ORIGINAL_PREFIX, &id, &extension);

        self.storage.write(&original_path, data.clone()).await?;

        let thumbnail_path = self.derive_thumbnail(&original_path, data).await;

        tracing::info!(
            original_path = %original_path,
            thumbnail_path = %thumbnail_path,
            "Stored image upload"
        );

        Ok(StoredAsset {
            original_path,
            thumbnail_path,
        })
    }

    /// Store an upload in the default upload directory under the prefix of `kind`.
    ///
    /// Kinds without thumbnails (avatars, voice files) are written verbatim and report
    /// the original as their thumbnail.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn store_as(
        &self,
        kind: AssetKind,
        data: Bytes,
        filename: Option<&str>,
    ) -> MediaResult<StoredAsset> {
        if kind.has_thumbnail() {
            return self.store(data, filename, &self.config.upload_subdir).await;
        }

        let id = new_asset_id();
        let extension = extension_or_fallback(filename);
        let path = asset_key(&self.config.upload_subdir, kind.prefix(), &id, &extension);

        self.storage.write(&path, data).await?;

        tracing::info!(path = %path, kind = %kind, "Stored upload");

        Ok(StoredAsset::original_only(path))
    }

    /// Thumbnail path paired with `original_path`. Legacy paths map to themselves.
    pub fn derive_thumbnail_path(&self, original_path: &str) -> String {
        derive_thumbnail_path(original_path)
    }

    /// Delete one file. Returns `true` when a file was removed.
    ///
    /// Missing files, rejected paths and OS errors all return `false`; errors are logged.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }

        match self.storage.delete(path).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(error = %e, path = %path, "Failed to delete asset file");
                false
            }
        }
    }

    /// Delete an original and, when it has one, its derived thumbnail.
    /// Returns the number of files removed.
    ///
    /// Only files directly inside the upload subdirectory are released; any other path
    /// under the public root removes nothing.
    pub async fn delete_with_thumbnail(&self, original_path: &str) -> usize {
        if !self.is_upload_path(original_path) {
            tracing::warn!(
                path = %original_path,
                "Refusing to release a file outside the upload directory"
            );
            return 0;
        }

        let mut removed = usize::from(self.delete(original_path).await);

        let thumbnail_path = derive_thumbnail_path(original_path);
        if thumbnail_path != original_path {
            removed += usize::from(self.delete(&thumbnail_path).await);
        }

        removed
    }

    /// Bare file names count as uploads since storage resolves them into the upload
    /// subdirectory.
    fn is_upload_path(&self, path: &str) -> bool {
        match Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent.file_name() == Some(OsStr::new(&self.config.upload_subdir)),
            None => true,
        }
    }

    /// Render and write the thumbnail for a freshly stored original. Falls back to the
    /// original path on any failure.
    async fn derive_thumbnail(&self, original_path: &str, data: Bytes) -> String {
        let thumbnail_path = derive_thumbnail_path(original_path);
        let generator = self.thumbnails;

        let rendered = tokio::task::spawn_blocking(move || generator.generate(&data)).await;

        let thumbnail = match rendered {
            Ok(Ok(thumbnail)) => thumbnail,
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    original_path = %original_path,
                    "Thumbnail derivation failed, using original"
                );
                return original_path.to_string();
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    original_path = %original_path,
                    "Thumbnail task did not complete, using original"
                );
                return original_path.to_string();
            }
        };

        match self.storage.write(&thumbnail_path, thumbnail.data).await {
            Ok(()) => thumbnail_path,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    thumbnail_path = %thumbnail_path,
                    "Failed to write thumbnail, using original"
                );
                original_path.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{manager_in, png_bytes};
    use image::GenericImageView;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_writes_original_verbatim() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;
        let data = png_bytes(64, 48);

        let asset = manager
            .store(data.clone(), Some("photo.PNG"), "uploads")
            .await
            .unwrap();

        assert!(asset.original_path.starts_with("uploads/orig_"));
        assert!(asset.original_path.ends_with(".png"));
        let on_disk = std::fs::read(dir.path().join(&asset.original_path)).unwrap();
        assert_eq!(on_disk, data.to_vec());
    }

    #[tokio::test]
    async fn test_store_thumbnail_matches_derived_path() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store(png_bytes(64, 48), Some("photo.png"), "uploads")
            .await
            .unwrap();

        assert_eq!(
            manager.derive_thumbnail_path(&asset.original_path),
            asset.thumbnail_path
        );
        assert!(asset.thumbnail_path.starts_with("uploads/thumb_"));
        assert!(asset.thumbnail_path.ends_with(".webp"));
        assert!(dir.path().join(&asset.thumbnail_path).exists());
    }

    #[tokio::test]
    async fn test_store_ids_are_unique() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let a = manager
            .store(png_bytes(8, 8), Some("a.png"), "uploads")
            .await
            .unwrap();
        let b = manager
            .store(png_bytes(8, 8), Some("a.png"), "uploads")
            .await
            .unwrap();
        assert_ne!(a.original_path, b.original_path);
    }

    #[tokio::test]
    async fn test_store_bounds_large_image() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store(png_bytes(4000, 3000), Some("big.png"), "uploads")
            .await
            .unwrap();

        let thumb = image::open(dir.path().join(&asset.thumbnail_path)).unwrap();
        assert_eq!(thumb.dimensions(), (1200, 900));
    }

    #[tokio::test]
    async fn test_store_corrupt_image_falls_back_to_original() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;
        let data = Bytes::from_static(b"this is not an image at all");

        let asset = manager
            .store(data.clone(), Some("broken.jpg"), "uploads")
            .await
            .unwrap();

        assert_eq!(asset.thumbnail_path, asset.original_path);
        let on_disk = std::fs::read(dir.path().join(&asset.original_path)).unwrap();
        assert_eq!(on_disk, data.to_vec());

        let entries = std::fs::read_dir(dir.path().join("uploads")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_store_without_extension_uses_fallback() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store(png_bytes(8, 8), Some("noext"), "uploads")
            .await
            .unwrap();
        assert!(asset.original_path.ends_with(".jpg"));

        let asset = manager.store(png_bytes(8, 8), None, "uploads").await.unwrap();
        assert!(asset.original_path.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_store_as_avatar_has_no_thumbnail() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store_as(AssetKind::Avatar, png_bytes(32, 32), Some("me.png"))
            .await
            .unwrap();

        assert!(asset.original_path.starts_with("uploads/avatar_"));
        assert_eq!(asset.thumbnail_path, asset.original_path);
        let entries = std::fs::read_dir(dir.path().join("uploads")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_store_as_voice() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store_as(AssetKind::Voice, Bytes::from_static(b"OggS...."), Some("note.ogg"))
            .await
            .unwrap();

        assert!(asset.original_path.starts_with("uploads/voice_"));
        assert!(asset.original_path.ends_with(".ogg"));
        assert!(!asset.has_distinct_thumbnail());
    }

    #[tokio::test]
    async fn test_store_as_message_image_is_thumbnailed() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store_as(AssetKind::MessageImage, png_bytes(16, 16), Some("m.png"))
            .await
            .unwrap();

        assert!(asset.original_path.starts_with("uploads/orig_"));
        assert!(asset.has_distinct_thumbnail());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store(png_bytes(8, 8), Some("a.png"), "uploads")
            .await
            .unwrap();

        assert!(manager.delete(&asset.original_path).await);
        assert!(!manager.delete(&asset.original_path).await);
        assert!(!manager.delete("uploads/orig_missing.jpg").await);
        assert!(!manager.delete("").await);
    }

    #[tokio::test]
    async fn test_delete_rejected_path_returns_false() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        assert!(!manager.delete("../outside.txt").await);
        assert!(!manager.delete("/etc/hostname").await);
    }

    #[tokio::test]
    async fn test_delete_with_thumbnail() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;

        let asset = manager
            .store(png_bytes(8, 8), Some("a.png"), "uploads")
            .await
            .unwrap();

        assert_eq!(manager.delete_with_thumbnail(&asset.original_path).await, 2);
        assert!(!dir.path().join(&asset.original_path).exists());
        assert!(!dir.path().join(&asset.thumbnail_path).exists());
        assert_eq!(manager.delete_with_thumbnail(&asset.original_path).await, 0);
    }

    #[tokio::test]
    async fn test_delete_with_thumbnail_legacy_path() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;
        std::fs::write(dir.path().join("uploads/legacy.jpg"), b"x").unwrap();

        assert_eq!(manager.delete_with_thumbnail("uploads/legacy.jpg").await, 1);
    }

    #[tokio::test]
    async fn test_delete_with_thumbnail_only_touches_uploads() {
        let dir = tempdir().unwrap();
        let manager = manager_in(dir.path()).await;
        std::fs::create_dir_all(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/site.css"), b"body {}").unwrap();
        std::fs::write(dir.path().join("uploads/orig_a.jpg"), b"x").unwrap();

        assert_eq!(manager.delete_with_thumbnail("css/site.css").await, 0);
        assert!(dir.path().join("css/site.css").exists());

        assert_eq!(manager.delete_with_thumbnail("orig_a.jpg").await, 1);
        assert!(!dir.path().join("uploads/orig_a.jpg").exists());
    }
}
