//! Quill Core Library
//!
//! This crate provides the asset models, error types and configuration shared by all
//! Quill components: the filename convention that pairs originals with their derived
//! thumbnails, the persisted asset list format, and the explicit media configuration
//! handed to the asset manager.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, MediaConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    derive_thumbnail_path, extension_or_fallback, public_url, AssetKind, AssetList, StoredAsset,
    StoredAssetEntry,
};
