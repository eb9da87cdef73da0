//! HTTP handlers

pub mod assets;
pub mod avatar;
pub mod serve;
pub mod uploads;

use quill_core::{public_url, StoredAsset};
use serde::Serialize;
use utoipa::ToSchema;

/// A stored asset together with the URLs it is served under.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedAsset {
    #[schema(example = "uploads/orig_3f2a9c0d4b1e4f6a8c7d2e1f0a9b8c7d.jpg")]
    pub original_path: String,
    #[schema(example = "uploads/thumb_3f2a9c0d4b1e4f6a8c7d2e1f0a9b8c7d.webp")]
    pub thumbnail_path: String,
    #[schema(example = "/uploads/orig_3f2a9c0d4b1e4f6a8c7d2e1f0a9b8c7d.jpg")]
    pub url: String,
    pub thumbnail_url: String,
}

impl From<StoredAsset> for UploadedAsset {
    fn from(asset: StoredAsset) -> Self {
        Self {
            url: public_url(&asset.original_path),
            thumbnail_url: public_url(&asset.thumbnail_path),
            original_path: asset.original_path,
            thumbnail_path: asset.thumbnail_path,
        }
    }
}
