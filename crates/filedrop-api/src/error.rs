//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every domain error converts into
//! `AppError` first, so status, body, and log level come from one table.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filedrop_core::{AppError, ErrorMetadata, LogLevel};
use filedrop_processing::UploadError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
///
/// `IntoResponse` and `AppError` both live in other crates, so the impl needs
/// a local type.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// A body that is not `multipart/form-data` (or has no boundary).
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Expected a multipart/form-data body: {}",
            rejection.body_text()
        )))
    }
}

/// Malformed multipart framing before the file part was found.
impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Failed to read multipart: {}",
            err.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl ErrorResponse {
    fn from_app_error(app_error: &AppError, with_details: bool) -> Self {
        Self {
            error: app_error.client_message(),
            details: with_details.then(|| app_error.detailed_message()),
            error_type: with_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details only outside production and only for non-sensitive errors.
        let with_details = !is_production_env() && !app_error.is_sensitive();
        let body = ErrorResponse::from_app_error(app_error, with_details);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_upload_error_unsupported() {
        let HttpAppError(app_err) = UploadError::UnsupportedFileType {
            extension: ".zip".to_string(),
        }
        .into();
        match app_err {
            AppError::UnsupportedFileType { extension } => assert_eq!(extension, ".zip"),
            _ => panic!("Expected UnsupportedFileType variant"),
        }
    }

    #[test]
    fn test_from_upload_error_destination() {
        let HttpAppError(app_err) =
            UploadError::DestinationUnavailable("permission denied".to_string()).into();
        assert!(matches!(app_err, AppError::DestinationUnavailable(_)));
    }

    #[test]
    fn test_into_response_status_codes() {
        let cases = [
            (
                HttpAppError::from(UploadError::UnsupportedFileType {
                    extension: ".zip".to_string(),
                }),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                HttpAppError::from(UploadError::PayloadTooLarge { limit: 10 }),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                HttpAppError::from(UploadError::DestinationUnavailable("x".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                HttpAppError::from(UploadError::StreamFailed("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                HttpAppError::from(AppError::InvalidInput("no file".to_string())),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_sensitive_errors_hide_details() {
        let err = AppError::DestinationUnavailable("/srv/uploads: read-only".to_string());
        let body = ErrorResponse::from_app_error(&err, false);
        assert_eq!(body.code, "DESTINATION_UNAVAILABLE");
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
        assert!(!body.error.contains("/srv/uploads"));
    }

    #[test]
    fn test_details_included_when_allowed() {
        let err = AppError::StreamFailed("connection reset".to_string());
        let body = ErrorResponse::from_app_error(&err, true);
        assert_eq!(body.error_type.as_deref(), Some("StreamFailed"));
        assert!(body.details.unwrap().contains("connection reset"));
    }
}
