//! API error types and domain-error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ModelLoadError};

/// Error categories exposed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    ValidationError,
    NotFoundError,
    ConflictError,
    RegistryError,
    PredictionError,
    ServerError,
}

/// Error response body: `{ "error": { "message", "type" } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                },
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::ValidationError,
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let message = error.to_string();
        match error {
            DomainError::Validation { .. } => Self::bad_request(message),
            DomainError::NotFound { .. } => Self::not_found(message),
            DomainError::ModelResolution(ModelLoadError::NotFound { .. }) => {
                Self::not_found(message)
            }
            DomainError::ModelResolution(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiErrorType::RegistryError,
                message,
            ),
            DomainError::PredictionExecution { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorType::PredictionError,
                message,
            ),
            DomainError::Conflict { .. } => {
                Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
            }
            DomainError::Storage { .. } | DomainError::Configuration { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorType::ServerError,
                message,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}
