use quill_storage::StorageError;

/// Errors surfaced by the asset manager. Only writing an original can fail an upload.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to store original: {0}")]
    Storage(#[from] StorageError),
}

pub type MediaResult<T> = Result<T, MediaError>;
