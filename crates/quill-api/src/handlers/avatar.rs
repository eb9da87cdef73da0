use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use quill_core::{AppError, AssetKind};
use quill_processing::validator_for_kind;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::UploadedAsset;
use crate::state::AppState;

/// Replace a user's avatar
///
/// Form fields: `avatar` (file) and optionally `previous`, the stored path of the
/// avatar being replaced. The previous file is deleted once the new one is stored.
#[utoipa::path(
    put,
    path = "/api/v1/avatar",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar stored", body = UploadedAsset),
        (status = 400, description = "Missing or invalid file", body = ErrorResponse),
        (status = 413, description = "Request too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "replace_avatar"))]
pub async fn replace_avatar(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadedAsset>, HttpAppError> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;
    let mut previous: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("avatar") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                upload = Some((filename, content_type, data));
            }
            Some("previous") => {
                let text = field.text().await?;
                previous = Some(text.trim().to_string()).filter(|p| !p.is_empty());
            }
            _ => {}
        }
    }

    let (filename, content_type, data) = upload
        .filter(|(filename, _, _)| !filename.is_empty())
        .ok_or_else(|| AppError::BadRequest("No avatar file provided".to_string()))?;

    validator_for_kind(AssetKind::Avatar, &state.config).validate_all(
        &filename,
        content_type.as_deref(),
        data.len(),
    )?;

    let stored = state
        .media
        .store_as(AssetKind::Avatar, data, Some(&filename))
        .await?;
    let current = state.lifecycle.replace(previous.as_deref(), stored).await;

    Ok(Json(UploadedAsset::from(current)))
}
