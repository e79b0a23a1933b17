// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use escopo_core::ValidationError;
use escopo_storage::StorageError;
use serde::Serialize;
use tracing::error;

use crate::controller::ControllerError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Error envelope that also lists field-level validation failures
#[derive(Serialize)]
struct ValidationResponse<'a> {
    success: bool,
    data: Option<()>,
    error: String,
    errors: &'a [ValidationError],
}

pub fn ok<T: Serialize>(data: T) -> axum::response::Response {
    (StatusCode::OK, ResponseJson(ApiResponse::success(data))).into_response()
}

pub fn created<T: Serialize>(data: T) -> axum::response::Response {
    (StatusCode::CREATED, ResponseJson(ApiResponse::success(data))).into_response()
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, ResponseJson(ApiResponse::<()>::error(message.into()))).into_response()
}

fn storage_status(err: &StorageError) -> (StatusCode, String) {
    match err {
        StorageError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        StorageError::Backend(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Table store unavailable".to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    }
}

/// Local wrapper so storage errors can be returned from handlers
pub struct StorageErrorResponse(pub StorageError);

impl From<StorageError> for StorageErrorResponse {
    fn from(err: StorageError) -> Self {
        Self(err)
    }
}

/// Convert storage errors to HTTP responses
impl IntoResponse for StorageErrorResponse {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = storage_status(&self.0);
        if status.is_server_error() {
            error!("Storage failure: {}", self.0);
        }
        error_response(status, message)
    }
}

/// Convert controller errors to HTTP responses
impl IntoResponse for ControllerError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ControllerError::Validation(errors) => {
                let body = ValidationResponse {
                    success: false,
                    data: None,
                    error: "Validation failed".to_string(),
                    errors,
                };
                (StatusCode::BAD_REQUEST, ResponseJson(body)).into_response()
            }
            ControllerError::NotFound(_) => error_response(StatusCode::NOT_FOUND, self.to_string()),
            ControllerError::ReadOnly(_) | ControllerError::DisciplineMismatch { .. } => {
                error_response(StatusCode::CONFLICT, self.to_string())
            }
            ControllerError::Storage(err) => {
                let (status, message) = storage_status(err);
                if status.is_server_error() {
                    error!("Storage failure: {}", err);
                }
                error_response(status, message)
            }
            ControllerError::Render(err) => {
                error!("Document rendering failed: {}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}
