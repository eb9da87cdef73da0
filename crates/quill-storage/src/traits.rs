//! Storage abstraction trait
//!
//! This module defines the Storage trait implemented by blob store backends.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid asset path: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Blob store for uploaded assets.
///
/// Keys are paths relative to the public asset root (`uploads/orig_<id>.jpg`).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a new file. Fails if the key already exists; existing files are never
    /// overwritten.
    async fn write(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Size in bytes of an existing file.
    async fn content_length(&self, key: &str) -> StorageResult<u64>;

    /// Remove a file.
    ///
    /// Accepts any stored path form (see the crate documentation). Returns `Ok(true)` when
    /// a file was removed and `Ok(false)` when there was nothing to remove.
    async fn delete(&self, path: &str) -> StorageResult<bool>;

    /// Download a file as a stream of chunks.
    async fn download_stream(&self, key: &str) -> StorageResult<ByteStream>;
}
