//! Entity lifecycle endpoints: edit-time reconciliation and asset release.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReconcileRequest {
    /// The entity's persisted image column (JSON array text), if any.
    #[serde(default)]
    #[schema(example = r#"["uploads/orig_a.jpg","uploads/orig_b.jpg"]"#)]
    pub stored: Option<String>,
    /// Indices (as decimal strings) of stored entries the editor kept.
    #[serde(default)]
    #[schema(example = json!(["1"]))]
    pub keep: Vec<String>,
    /// Original paths uploaded during the same edit, appended after the kept entries.
    #[serde(default)]
    pub uploaded: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReconcileResponse {
    /// New column value; null when no images remain.
    pub image_path: Option<String>,
    pub paths: Vec<String>,
    pub removed: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReleaseRequest {
    #[serde(default)]
    pub stored: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteAssetRequest {
    #[schema(example = "uploads/voice_3f2a9c0d4b1e4f6a8c7d2e1f0a9b8c7d.webm")]
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    /// Number of files removed, thumbnails included.
    pub deleted: usize,
}

/// Reconcile an entity's image list after an edit
///
/// Dropped entries are deleted together with their thumbnails. A malformed `stored`
/// value counts as an empty list.
#[utoipa::path(
    post,
    path = "/api/v1/assets/reconcile",
    tag = "assets",
    request_body = ReconcileRequest,
    responses(
        (status = 200, description = "List reconciled", body = ReconcileResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "reconcile_assets"))]
pub async fn reconcile_assets(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, HttpAppError> {
    let keep: HashSet<String> = request.keep.into_iter().collect();

    let result = state
        .media
        .reconcile(request.stored.as_deref(), &keep, request.uploaded)
        .await;

    Ok(Json(ReconcileResponse {
        image_path: result.to_column(),
        paths: result.paths.into_inner(),
        removed: result.removed,
    }))
}

/// Release every asset of a deleted entity
#[utoipa::path(
    post,
    path = "/api/v1/assets/release",
    tag = "assets",
    request_body = ReleaseRequest,
    responses(
        (status = 200, description = "Assets released", body = DeletedResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "release_assets"))]
pub async fn release_assets(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ReleaseRequest>,
) -> Result<Json<DeletedResponse>, HttpAppError> {
    let deleted = state.lifecycle.release_all(request.stored.as_deref()).await;
    Ok(Json(DeletedResponse { deleted }))
}

/// Delete a single asset and its thumbnail
///
/// Idempotent: a missing file reports `deleted: 0`.
#[utoipa::path(
    delete,
    path = "/api/v1/assets",
    tag = "assets",
    request_body = DeleteAssetRequest,
    responses(
        (status = 200, description = "Asset deleted or already absent", body = DeletedResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_asset"))]
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<DeleteAssetRequest>,
) -> Result<Json<DeletedResponse>, HttpAppError> {
    let deleted = state.lifecycle.release(Some(&request.path)).await;
    Ok(Json(DeletedResponse { deleted }))
}
