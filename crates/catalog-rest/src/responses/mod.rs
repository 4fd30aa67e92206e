//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{CatalogError, Origin};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Outcome label carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard API response envelope.
///
/// Successful reads carry `location` and `data`; failures carry `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Origin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response tagged with where the data came from.
    pub fn success(location: Origin, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            location: Some(location),
            message: None,
            data: Some(data),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status: ResponseStatus::Error,
            location: None,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub CatalogError);

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        error!(code = self.0.error_code(), error = %self.0, "Request failed");

        let body = Json(ApiResponse::<()>::error(self.0.public_message()));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(location: Origin, data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(location, data)))
}
