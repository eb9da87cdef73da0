//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use quill_core::models;

/// The OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill Media API",
        version = "0.1.0",
        description = "Media asset endpoints for the blog: storing uploads with derived WebP thumbnails, reconciling an entity's image list on edit, releasing assets when entities are deleted, and serving stored files."
    ),
    paths(
        handlers::uploads::upload_assets,
        handlers::avatar::replace_avatar,
        handlers::assets::reconcile_assets,
        handlers::assets::release_assets,
        handlers::assets::delete_asset,
        handlers::serve::serve_upload,
        handlers::serve::serve_thumbnail,
    ),
    components(
        schemas(
            models::AssetKind,
            models::StoredAsset,
            handlers::UploadedAsset,
            handlers::uploads::UploadResponse,
            handlers::assets::ReconcileRequest,
            handlers::assets::ReconcileResponse,
            handlers::assets::ReleaseRequest,
            handlers::assets::DeleteAssetRequest,
            handlers::assets::DeletedResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Storing uploaded images, avatars and voice files"),
        (name = "assets", description = "Reconciling and releasing assets owned by blog entities"),
        (name = "serve", description = "Serving stored uploads and their thumbnails")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_paths() {
        let spec = get_openapi_spec();
        for path in [
            "/api/v1/uploads/{kind}",
            "/api/v1/avatar",
            "/api/v1/assets/reconcile",
            "/api/v1/assets/release",
            "/api/v1/assets",
            "/uploads/{filename}",
            "/uploads/{filename}/thumbnail",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
