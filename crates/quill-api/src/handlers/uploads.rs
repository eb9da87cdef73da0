use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use quill_core::{AppError, AssetKind};
use quill_processing::validator_for_kind;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::UploadedAsset;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub kind: AssetKind,
    /// Stored files, in the order their parts appeared in the form.
    pub assets: Vec<UploadedAsset>,
    /// Declared filenames of parts that failed validation and were not stored.
    pub skipped: Vec<String>,
}

/// Upload one or more files for an entity of the given kind
///
/// Every part carrying a filename is treated as a file. Parts that fail validation
/// (extension, emptiness, size) are skipped and reported back; the rest are stored.
/// Image kinds get a WebP thumbnail; avatars and voice files are stored as-is.
#[utoipa::path(
    post,
    path = "/api/v1/uploads/{kind}",
    tag = "uploads",
    params(
        ("kind" = String, Path, description = "Asset kind: post_image, message_image, avatar or voice")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Files stored", body = UploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "Request too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_assets"))]
pub async fn upload_assets(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let kind: AssetKind = kind.parse().map_err(AppError::InvalidInput)?;
    let validator = validator_for_kind(kind, &state.config);

    let mut assets = Vec::new();
    let mut skipped = Vec::new();
    let mut file_parts = 0usize;

    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        // Browsers submit empty file inputs as a part with an empty filename.
        if filename.is_empty() {
            continue;
        }
        file_parts += 1;

        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        if let Err(e) = validator.validate_all(&filename, content_type.as_deref(), data.len()) {
            tracing::info!(
                filename = %filename,
                kind = %kind,
                reason = %e,
                "Skipping disallowed upload"
            );
            skipped.push(filename);
            continue;
        }

        let stored = state.media.store_as(kind, data, Some(&filename)).await?;
        assets.push(UploadedAsset::from(stored));
    }

    if file_parts == 0 {
        return Err(AppError::BadRequest("No file provided".to_string()).into());
    }

    tracing::info!(
        kind = %kind,
        stored = assets.len(),
        skipped = skipped.len(),
        "Upload request processed"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            kind,
            assets,
            skipped,
        }),
    ))
}
