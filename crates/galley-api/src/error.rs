//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for
//! `AppError`.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse,
//! HttpAppError>`. Use `AppError` (or types that implement
//! `Into<HttpAppError>`) for errors so they render consistently (status,
//! body, logging).

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use galley_core::{AppError, ErrorMetadata, LogLevel};
use galley_storage::StorageError;
use galley_submission::{StoreError, SubmitError};
use galley_upload::FileValidationError;

#[derive(Debug, Serialize, ToSchema)]
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
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Field-level messages, where the error is attributable to fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Wrapper type for AppError to implement IntoResponse. Necessary because of
/// Rust's orphan rules: we can't implement IntoResponse (external trait) for
/// AppError (type from galley-core). Carries optional field-level messages
/// for submission errors.
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub fields: Option<BTreeMap<String, String>>,
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError {
            error,
            fields: None,
        }
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError::from(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError::from(app)
    }
}

impl From<FileValidationError> for HttpAppError {
    fn from(err: FileValidationError) -> Self {
        let app = match err {
            FileValidationError::FileTooLarge { size, max } => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            other => AppError::InvalidInput(other.to_string()),
        };
        HttpAppError::from(app)
    }
}

impl From<StoreError> for HttpAppError {
    fn from(err: StoreError) -> Self {
        let app = match err {
            StoreError::UniqueViolation { constraint } => AppError::TitleConflict(constraint),
            other => AppError::Store(other.to_string()),
        };
        HttpAppError::from(app)
    }
}

impl From<SubmitError> for HttpAppError {
    fn from(err: SubmitError) -> Self {
        let fields = err
            .field_errors()
            .map(|field_errors| field_errors.into_inner());
        let app = match err {
            SubmitError::Invalid(errors) => AppError::InvalidInput(errors.to_string()),
            SubmitError::TitleConflict => {
                AppError::TitleConflict("articles_title_key".to_string())
            }
            SubmitError::Store(err) => AppError::Store(err.to_string()),
        };
        HttpAppError { error: app, fields }
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
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Hide details in production and for sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
                fields: self.fields,
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
                fields: self.fields,
            })
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let storage_err = StorageError::NotFound("File not found".to_string());
        let http_err: HttpAppError = storage_err.into();
        match http_err.error {
            AppError::NotFound(msg) => assert_eq!(msg, "File not found"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_validation_error_file_too_large() {
        let validation_err = FileValidationError::FileTooLarge {
            size: 1000,
            max: 500,
        };
        let http_err: HttpAppError = validation_err.into();
        match http_err.error {
            AppError::PayloadTooLarge(msg) => {
                assert!(msg.contains("1000"));
                assert!(msg.contains("500"));
            }
            _ => panic!("Expected PayloadTooLarge variant"),
        }
    }

    #[test]
    fn test_from_store_error_unique_violation() {
        let store_err = StoreError::UniqueViolation {
            constraint: "articles_title_key".to_string(),
        };
        let http_err: HttpAppError = store_err.into();
        assert!(matches!(http_err.error, AppError::TitleConflict(_)));
        assert_eq!(http_err.error.http_status_code(), 409);
    }

    #[test]
    fn test_from_submit_error_carries_field_messages() {
        let http_err: HttpAppError = SubmitError::TitleConflict.into();
        let fields = http_err.fields.expect("field messages");
        assert!(fields.contains_key("title"));
    }

    /// Public error response contract: serialized ErrorResponse has "error",
    /// "code", "recoverable", and optionally "details" / "fields".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Not found".to_string(),
            details: Some("Resource not found".to_string()),
            error_type: Some("NotFound".to_string()),
            code: "NOT_FOUND".to_string(),
            recoverable: false,
            suggested_action: None,
            fields: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert!(json.get("suggested_action").is_none());
        assert!(json.get("fields").is_none());
    }
}
