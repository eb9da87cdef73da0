//! Serving stored uploads.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use quill_core::{derive_thumbnail_path, AppError};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Serve an uploaded file
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "serve",
    params(
        ("filename" = String, Path, description = "Stored file name, e.g. orig_<id>.jpg")
    ),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let key = upload_key(&state, &filename)?;
    stream_file(&state, &key).await
}

/// Serve the thumbnail of an uploaded file
///
/// Falls back to the original when the name has no thumbnail counterpart (legacy
/// uploads, avatars, voice files) or the thumbnail was never written.
#[utoipa::path(
    get,
    path = "/uploads/{filename}/thumbnail",
    tag = "serve",
    params(
        ("filename" = String, Path, description = "Stored original file name")
    ),
    responses(
        (status = 200, description = "Thumbnail or original contents", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn serve_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let key = upload_key(&state, &filename)?;
    let thumbnail_key = derive_thumbnail_path(&key);

    let storage = state.media.storage();
    if thumbnail_key != key && storage.exists(&thumbnail_key).await.unwrap_or(false) {
        return stream_file(&state, &thumbnail_key).await;
    }

    tracing::debug!(key = %key, "No thumbnail on disk, serving original");
    stream_file(&state, &key).await
}

/// Storage key of a served file name. Anything that could leave the upload directory
/// is rejected.
fn upload_key(state: &AppState, filename: &str) -> Result<String, HttpAppError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        tracing::warn!(filename = %filename, "Rejected upload file name");
        return Err(AppError::BadRequest("Invalid file name".to_string()).into());
    }

    Ok(format!("{}/{}", state.config.upload_subdir, filename))
}

async fn stream_file(state: &AppState, key: &str) -> Result<Response, HttpAppError> {
    let storage = state.media.storage();

    let content_length = storage.content_length(key).await?;
    let stream = storage.download_stream(key).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_type = mime_guess::from_path(key).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            AppError::Internal(e.to_string()).into()
        })
}
