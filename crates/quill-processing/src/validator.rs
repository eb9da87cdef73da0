use quill_core::{AssetKind, Config};
use std::path::Path;

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (expected one of: {expected:?})")]
    InvalidContentType {
        content_type: String,
        expected: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

/// Upload validator for one asset kind.
///
/// Runs in the route layer before the asset manager sees the file; the manager itself
/// does not re-validate.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl MediaValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = extension_of(filename)?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Reject a declared Content-Type that contradicts the file extension.
    ///
    /// Generic types (`application/octet-stream`) and extensions without a known mapping
    /// are accepted.
    pub fn validate_extension_content_type_match(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let extension = extension_of(filename)?;
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        if normalized.is_empty() || normalized == "application/octet-stream" {
            return Ok(());
        }

        let expected: &[&str] = match extension.as_str() {
            "jpg" | "jpeg" => &["image/jpeg", "image/jpg", "image/pjpeg"],
            "png" => &["image/png"],
            "gif" => &["image/gif"],
            "webp" => &["image/webp"],
            "webm" => &["audio/webm", "video/webm"],
            "ogg" => &["audio/ogg", "application/ogg"],
            "mp3" => &["audio/mpeg", "audio/mp3"],
            "wav" => &["audio/wav", "audio/wave", "audio/x-wav"],
            "m4a" => &["audio/mp4", "audio/x-m4a", "audio/m4a"],
            _ => {
                tracing::debug!(
                    extension = %extension,
                    content_type = %content_type,
                    "Unknown extension, skipping Content-Type/extension cross-validation"
                );
                return Ok(());
            }
        };

        if !expected.iter().any(|ct| *ct == normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
            });
        }

        Ok(())
    }

    /// Validate size, extension and (when declared) content type.
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: Option<&str>,
        file_size: usize,
    ) -> Result<(), ValidationError> {
        self.validate_file_size(file_size)?;
        self.validate_extension(filename)?;
        if let Some(content_type) = content_type {
            self.validate_extension_content_type_match(filename, content_type)?;
        }
        Ok(())
    }
}

fn extension_of(filename: &str) -> Result<String, ValidationError> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))
}

/// Validator for uploads of the given kind. Voice attachments have their own allowed set.
pub fn validator_for_kind(kind: AssetKind, config: &Config) -> MediaValidator {
    let allowed = if kind.is_voice() {
        config.voice_allowed_extensions.clone()
    } else {
        config.allowed_extensions.clone()
    };

    MediaValidator::new(config.max_content_length, allowed)
}
