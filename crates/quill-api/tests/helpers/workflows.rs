//! Workflow helpers for integration tests (upload, then operate on the stored paths).

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

use super::{api_path, fixtures};

/// Paths reported for one stored upload.
pub struct UploadedPaths {
    pub original_path: String,
    pub thumbnail_path: String,
}

pub fn png_part(filename: &str, width: u32, height: u32) -> Part {
    Part::bytes(bytes::Bytes::from(fixtures::create_test_png(width, height)))
        .file_name(filename.to_string())
        .mime_type("image/png")
}

/// Upload a single PNG as a post image and return its stored paths.
pub async fn upload_post_image(client: &TestServer, width: u32, height: u32) -> UploadedPaths {
    let form = MultipartForm::new().add_part("images", png_part("photo.png", width, height));
    let response = client
        .post(&api_path("/uploads/post_image"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    let asset = &body["assets"][0];

    UploadedPaths {
        original_path: asset["original_path"]
            .as_str()
            .expect("original_path missing")
            .to_string(),
        thumbnail_path: asset["thumbnail_path"]
            .as_str()
            .expect("thumbnail_path missing")
            .to_string(),
    }
}

/// File name part of a stored path (`uploads/orig_x.png` → `orig_x.png`).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
