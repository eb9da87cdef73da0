//! Upload serving integration tests.
//!
//! Run with: `cargo test -p quill-api --test serve_test`

mod helpers;

use helpers::workflows::{file_name, upload_post_image};
use helpers::{fixtures, setup_test_app};

#[tokio::test]
async fn test_serve_original() {
    let app = setup_test_app().await;
    let uploaded = upload_post_image(app.client(), 32, 32).await;

    let response = app
        .client()
        .get(&format!("/uploads/{}", file_name(&uploaded.original_path)))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.as_bytes().to_vec(),
        fixtures::create_test_png(32, 32)
    );
}

#[tokio::test]
async fn test_serve_thumbnail() {
    let app = setup_test_app().await;
    let uploaded = upload_post_image(app.client(), 32, 32).await;

    let response = app
        .client()
        .get(&format!(
            "/uploads/{}/thumbnail",
            file_name(&uploaded.original_path)
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/webp");
    let on_disk = std::fs::read(app.root().join(&uploaded.thumbnail_path)).unwrap();
    assert_eq!(response.as_bytes().to_vec(), on_disk);
}

#[tokio::test]
async fn test_serve_legacy_thumbnail_falls_back_to_original() {
    let app = setup_test_app().await;
    let contents = fixtures::create_test_jpeg(8, 8);
    app.write("uploads/legacy_photo.jpg", &contents);

    let response = app.client().get("/uploads/legacy_photo.jpg/thumbnail").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(response.as_bytes().to_vec(), contents);
}

#[tokio::test]
async fn test_serve_missing_thumbnail_falls_back_to_original() {
    let app = setup_test_app().await;
    app.write("uploads/orig_nothumb.png", b"original bytes");

    let response = app.client().get("/uploads/orig_nothumb.png/thumbnail").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().to_vec(), b"original bytes".to_vec());
}

#[tokio::test]
async fn test_serve_missing_file_is_404() {
    let app = setup_test_app().await;

    let response = app.client().get("/uploads/orig_missing.png").await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_serve_rejects_traversal() {
    let app = setup_test_app().await;
    app.write("secret.txt", b"do not serve");

    for path in [
        "/uploads/..%2Fsecret.txt",
        "/uploads/..%5Csecret.txt",
        "/uploads/a..b",
    ] {
        let response = app.client().get(path).await;
        assert_eq!(response.status_code(), 400, "path {}", path);
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/v1/assets/reconcile"].is_object());
}
