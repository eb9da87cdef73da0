use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage rooted at the public asset directory.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
    canonical_root: PathBuf,
    default_subdir: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `root` - Public asset root (e.g. "static")
    /// * `default_subdir` - Directory beneath the root that bare file names resolve into
    pub async fn new(root: impl Into<PathBuf>, default_subdir: &str) -> StorageResult<Self> {
        let root = root.into();
        let upload_dir = root.join(default_subdir);

        fs::create_dir_all(&upload_dir).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                upload_dir.display(),
                e
            ))
        })?;

        let canonical_root = root.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to canonicalize asset root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            root,
            canonical_root,
            default_subdir: default_subdir.to_string(),
        })
    }

    /// Resolve a stored path to a filesystem location beneath the asset root.
    ///
    /// Absolute paths pass through when they lie beneath the root. Relative paths that
    /// already start with the root (`static/uploads/x.jpg` for root `static`) resolve
    /// directly; other relative paths with a directory component are rooted at the asset
    /// root. Bare file names resolve beneath the default upload subdirectory.
    pub fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        if path.trim().is_empty() {
            return Err(StorageError::InvalidKey("empty path".to_string()));
        }

        let candidate = Path::new(path);
        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(StorageError::InvalidKey(format!(
                "{} contains a parent directory component",
                path
            )));
        }

        let resolved = if candidate.is_absolute() {
            if !candidate.starts_with(&self.canonical_root) && !candidate.starts_with(&self.root)
            {
                return Err(StorageError::InvalidKey(format!(
                    "{} lies outside the asset root",
                    path
                )));
            }
            candidate.to_path_buf()
        } else if path.contains('/') {
            self.root.join(self.strip_root_prefix(candidate))
        } else {
            self.root.join(&self.default_subdir).join(candidate)
        };

        // Symlinks inside the root must not lead outside it.
        if let Ok(canonical) = resolved.canonicalize() {
            if canonical.strip_prefix(&self.canonical_root).is_err() {
                return Err(StorageError::InvalidKey(format!(
                    "{} resolves outside the asset root",
                    path
                )));
            }
        }

        Ok(resolved)
    }

    /// Drop a leading copy of the root from a relative path. The root's own directory
    /// name only counts when it differs from the default subdirectory, so that
    /// `uploads/x` under a root named `uploads` still means `<root>/uploads/x`.
    fn strip_root_prefix<'a>(&self, candidate: &'a Path) -> &'a Path {
        if let Ok(rest) = candidate.strip_prefix(&self.root) {
            return rest;
        }

        match self.root.file_name() {
            Some(name) if name != self.default_subdir.as_str() => {
                candidate.strip_prefix(name).unwrap_or(candidate)
            }
            _ => candidate,
        }
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn write(&self, key: &str, data: Bytes) -> StorageResult<()> {
        let path = self.resolve(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.resolve(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn content_length(&self, key: &str) -> StorageResult<u64> {
        let path = self.resolve(key)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    async fn delete(&self, path: &str) -> StorageResult<bool> {
        let resolved = self.resolve(path)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&resolved).await {
            Ok(()) => {
                tracing::info!(
                    path = %resolved.display(),
                    key = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage delete successful"
                );
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %resolved.display(), "Nothing to delete");
                Ok(false)
            }
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                resolved.display(),
                e
            ))),
        }
    }

    async fn download_stream(&self, key: &str) -> StorageResult<ByteStream> {
        let path = self.resolve(key)?;
        let start = std::time::Instant::now();

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let reader = tokio_util::io::ReaderStream::new(file);

        let key = key.to_string();
        let path_display = path.display().to_string();
        let stream = reader.map(move |item| {
            item.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage stream download error"
                );
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }
}
