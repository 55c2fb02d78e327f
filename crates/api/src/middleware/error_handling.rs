//! # Error Handling Middleware
//!
//! Maps domain errors onto HTTP status codes and JSON error responses so
//! every endpoint reports failures the same way. Client-correctable
//! conditions become 4xx responses carrying the domain message;
//! infrastructure failures become a 500 with a generic body, with the
//! underlying error logged rather than echoed to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use examsync_core::errors::SchedulingError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain `SchedulingError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and `{"message": ...}` JSON bodies.
#[derive(Debug)]
pub struct AppError(pub SchedulingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            SchedulingError::NotFound(_) => StatusCode::NOT_FOUND,
            SchedulingError::Validation(_) => StatusCode::BAD_REQUEST,
            SchedulingError::Conflict(_) => StatusCode::BAD_REQUEST,
            SchedulingError::InvalidState(_) => StatusCode::BAD_REQUEST,
            SchedulingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchedulingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Never leak infrastructure details to the client
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}

/// Automatic conversion from SchedulingError to AppError.
///
/// This implementation allows using the `?` operator with functions that
/// return `Result<T, SchedulingError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Wraps the eyre error in a `SchedulingError::Database` variant so
/// repository failures propagate through handlers with `?`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SchedulingError::Database(err))
    }
}
