use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lantern_cloud::{BlobStoreError, UploadError};
use lantern_core::card::ValidationError;
use lantern_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain error taxonomy (validation, upload, persistence,
/// not-found) and implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lantern_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A draft failed pre-flight validation. Local, user-correctable,
    /// and guaranteed to have performed no side effects.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The image upload failed; the whole submission is aborted and no
    /// record is created.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // (status, code, message, offending field for validation errors)
        let (status, code, message, field): (_, _, _, Option<&'static str>) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Draft validation ---
            AppError::Validation(err) => {
                let field = match err {
                    ValidationError::MissingField(field) => Some(field.name()),
                    ValidationError::CaptionWithoutImage => None,
                };
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    err.to_string(),
                    field,
                )
            }

            // --- Upload pipeline ---
            AppError::Upload(err) => classify_upload_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an upload error into an HTTP status, error code, and message.
///
/// User-correctable rejections (empty file, bad extension, non-image
/// payload) map to 400; store failures map to 502 with a sanitized
/// message.
fn classify_upload_error(err: &UploadError) -> (StatusCode, &'static str, String, Option<&'static str>) {
    match err {
        UploadError::EmptyFile
        | UploadError::UnsupportedExtension(_)
        | UploadError::NotAnImage => (
            StatusCode::BAD_REQUEST,
            "UPLOAD_INVALID",
            err.to_string(),
            None,
        ),
        UploadError::Store(store_err) => {
            tracing::error!(error = %store_err, "Blob store failure during upload");
            let message = match store_err {
                BlobStoreError::AlreadyExists { .. } => {
                    "Image upload failed: storage path collision".to_string()
                }
                _ => "Image upload failed".to_string(),
            };
            (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED", message, None)
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// `RowNotFound` maps to 404; everything else maps to 500 with a
/// sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String, Option<&'static str>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            )
        }
    }
}
