use quill_core::Config;
use quill_media::{AssetLifecycle, MediaAssetManager};
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub media: Arc<MediaAssetManager>,
    pub lifecycle: AssetLifecycle,
}

impl AppState {
    pub fn new(config: Config, media: Arc<MediaAssetManager>) -> Self {
        let lifecycle = AssetLifecycle::new(media.clone());
        Self {
            config,
            media,
            lifecycle,
        }
    }
}
