//! Route groups (uploads, assets, serving).

use crate::constants::{API_PREFIX, UPLOADS_PREFIX};
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

pub fn upload_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/uploads/{{kind}}", API_PREFIX),
            post(handlers::uploads::upload_assets),
        )
        .route(
            &format!("{}/avatar", API_PREFIX),
            put(handlers::avatar::replace_avatar),
        )
        .with_state(state)
}

pub fn asset_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/assets", API_PREFIX),
            delete(handlers::assets::delete_asset),
        )
        .route(
            &format!("{}/assets/reconcile", API_PREFIX),
            post(handlers::assets::reconcile_assets),
        )
        .route(
            &format!("{}/assets/release", API_PREFIX),
            post(handlers::assets::release_assets),
        )
        .with_state(state)
}

pub fn serve_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/{{filename}}", UPLOADS_PREFIX),
            get(handlers::serve::serve_upload),
        )
        .route(
            &format!("{}/{{filename}}/thumbnail", UPLOADS_PREFIX),
            get(handlers::serve::serve_thumbnail),
        )
        .with_state(state)
}
