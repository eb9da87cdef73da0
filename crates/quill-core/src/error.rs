//! Error types
//!
//! Failures that reach the HTTP boundary are expressed as [`AppError`]; each variant
//! carries its own presentation (status, code, retry hint, sensitivity, log level)
//! through [`ErrorMetadata`]. Failures the media subsystem recovers from locally
//! (thumbnailing, deletion, malformed stored lists) never become an `AppError`.

/// Severity an error is logged at when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes (bad input, missing files)
    Debug,
    Warn,
    /// Failures on our side
    Error,
}

/// How an error is presented to API clients.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable code, e.g. `STORAGE_ERROR`.
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request may succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show to the client.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose details, whatever the environment.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Fixed presentation of one `AppError` variant.
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

const RETRY_LATER: Option<&str> = Some("Retry after a short delay");

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::Storage(_) => Presentation {
                status: 500,
                code: "STORAGE_ERROR",
                recoverable: true,
                action: RETRY_LATER,
                sensitive: true,
                level: LogLevel::Error,
            },
            AppError::InvalidInput(_) => Presentation {
                status: 400,
                code: "INVALID_INPUT",
                recoverable: false,
                action: Some("Check request parameters and try again"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::BadRequest(_) => Presentation {
                status: 400,
                code: "BAD_REQUEST",
                recoverable: false,
                action: Some("Check request format and parameters"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::NotFound(_) => Presentation {
                status: 404,
                code: "NOT_FOUND",
                recoverable: false,
                action: Some("Verify the asset path exists"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::PayloadTooLarge(_) => Presentation {
                status: 413,
                code: "PAYLOAD_TOO_LARGE",
                recoverable: false,
                action: Some("Reduce file size and try again"),
                sensitive: false,
                level: LogLevel::Warn,
            },
            AppError::Internal(_) | AppError::InternalWithSource { .. } => Presentation {
                status: 500,
                code: "INTERNAL_ERROR",
                recoverable: true,
                action: RETRY_LATER,
                sensitive: true,
                level: LogLevel::Error,
            },
        }
    }

    /// Variant name reported as `error_type` outside production.
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Display text followed by up to five `Caused by` lines from the source chain.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;
        const MAX_DEPTH: usize = 5;

        let mut details = self.to_string();
        let mut causes = std::iter::successors(self.source(), |err| (*err).source());

        for cause in causes.by_ref().take(MAX_DEPTH) {
            details.push_str(&format!("\n  Caused by: {}", cause));
        }
        if causes.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
            AppError::InvalidInput(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_storage() {
        let err = AppError::Storage("disk full".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access storage");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Asset not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Asset not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge("600 bytes exceeds max 500 bytes".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert!(err.client_message().contains("600"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_internal_hides_message() {
        let err = AppError::from(anyhow::anyhow!("secret path /var/lib/quill"));
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.is_sensitive());
        assert_eq!(err.error_type(), "Internal");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("root cause").context("while writing original");
        let err = AppError::InternalWithSource {
            message: "upload failed".to_string(),
            source,
        };
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error: upload failed"));
        assert!(details.contains("Caused by: while writing original"));
        assert!(details.contains("Caused by: root cause"));
        assert!(!details.contains("truncated"));
    }

    #[test]
    fn test_detailed_message_truncates_deep_chain() {
        let source = (1..=7).fold(anyhow::anyhow!("root cause"), |err, level| {
            err.context(format!("layer {}", level))
        });
        let err = AppError::InternalWithSource {
            message: "upload failed".to_string(),
            source,
        };
        let details = err.detailed_message();
        assert_eq!(details.matches("Caused by").count(), 5);
        assert!(details.contains("Caused by: layer 7"));
        assert!(!details.contains("root cause"));
        assert!(details.ends_with("... (truncated)"));
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err1 = AppError::Storage("test".to_string());
        assert_eq!(err1.suggested_action(), Some("Retry after a short delay"));

        let err2 = AppError::InvalidInput("test".to_string());
        assert_eq!(
            err2.suggested_action(),
            Some("Check request parameters and try again")
        );
    }
}
