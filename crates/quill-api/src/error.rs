//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Anything that converts into
//! [`AppError`] renders with a consistent status, body and log line.

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_core::{AppError, Config, ErrorMetadata, LogLevel};
use quill_media::MediaError;
use quill_processing::ValidationError;
use quill_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Retrying the same request may succeed.
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// `AppError` rendered as an HTTP response. Needed because both `IntoResponse` and
/// `AppError` are foreign to this crate.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpAppError(AppError::PayloadTooLarge(err.body_text()))
        } else {
            HttpAppError(AppError::BadRequest(format!(
                "Invalid multipart body: {}",
                err.body_text()
            )))
        }
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app_err = match err {
            StorageError::NotFound(path) => AppError::NotFound(format!("File not found: {}", path)),
            StorageError::InvalidKey(path) => {
                AppError::BadRequest(format!("Invalid asset path: {}", path))
            }
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            other => AppError::Storage(other.to_string()),
        };
        HttpAppError(app_err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app_err = match err {
            ValidationError::FileTooLarge { size, max } => AppError::PayloadTooLarge(format!(
                "File size {} bytes exceeds maximum {} bytes",
                size, max
            )),
            other => AppError::InvalidInput(other.to_string()),
        };
        HttpAppError(app_err)
    }
}

impl From<MediaError> for HttpAppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Storage(e) => e.into(),
        }
    }
}

/// JSON body extractor that answers deserialization failures with a 400 in the
/// [`ErrorResponse`] shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, error_type, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, error_type, "Request failed"),
        LogLevel::Error => tracing::error!(
            error = %error,
            error_type,
            details = %error.detailed_message(),
            "Request failed"
        ),
    }
}

static HIDE_DETAILS: OnceLock<bool> = OnceLock::new();

/// Production configurations hide error details from every response. Only the first
/// call takes effect; until then details are shown.
pub fn configure_error_details(config: &Config) {
    let _ = HIDE_DETAILS.set(config.is_production());
}

fn details_hidden() -> bool {
    HIDE_DETAILS.get().copied().unwrap_or(false)
}

impl ErrorResponse {
    fn from_app_error(err: &AppError, show_details: bool) -> Self {
        Self {
            error: err.client_message(),
            details: show_details.then(|| err.detailed_message()),
            error_type: show_details.then(|| err.error_type().to_string()),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let HttpAppError(err) = self;
        log_error(&err);

        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let show_details = !details_hidden() && !err.is_sensitive();

        (status, Json(ErrorResponse::from_app_error(&err, show_details))).into_response()
    }
}
