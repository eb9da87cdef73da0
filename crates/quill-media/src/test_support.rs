use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use quill_core::MediaConfig;
use quill_storage::LocalStorage;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use crate::MediaAssetManager;

pub async fn manager_in(root: &Path) -> MediaAssetManager {
    let config = MediaConfig::new(root);
    let storage = LocalStorage::new(root, &config.upload_subdir).await.unwrap();
    MediaAssetManager::new(Arc::new(storage), config)
}

pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 140, 200])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    Bytes::from(buffer)
}

/// Write placeholder files at the given paths beneath `root`.
pub fn touch(root: &Path, paths: &[&str]) {
    for path in paths {
        let full = root.join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, b"x").unwrap();
    }
}
