// Error handling types for the API
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use super::validation::ValidationResult;
use crate::accounts::AccountError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    InvalidCredentials,
    NotFound(String),
    Conflict(String),
    InternalServer(String),
    DatabaseError(String),
    LoginNotRecorded(String),
    ValidationError(Vec<String>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::InvalidCredentials => write!(f, "Invalid Credentials"),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            ApiError::LoginNotRecorded(msg) => write!(f, "Login Not Recorded: {}", msg),
            ApiError::ValidationError(msgs) => write!(f, "Validation Error: {}", msgs.join(", ")),
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut details = None;
        let (status, error_message, code) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid phone number or password".to_string(),
                "INVALID_CREDENTIALS",
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT"),
            ApiError::InternalServer(msg) => {
                error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_SERVER_ERROR",
                )
            }
            ApiError::DatabaseError(msg) => {
                error!(error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
            ApiError::LoginNotRecorded(msg) => {
                error!(error = %msg, "Login accepted but not recorded");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Login could not be completed, please retry".to_string(),
                    "LOGIN_NOT_RECORDED",
                )
            }
            ApiError::ValidationError(msgs) => {
                details = Some(msgs);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    "VALIDATION_ERROR",
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
            details,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Validation(msgs) => ApiError::ValidationError(msgs),
            AccountError::InvalidCredentials => ApiError::InvalidCredentials,
            AccountError::Unauthorized(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            AccountError::Conflict(msg) => ApiError::Conflict(msg),
            AccountError::NotFound => ApiError::NotFound("User not found".to_string()),
            AccountError::Persistence(e) => ApiError::DatabaseError(e.to_string()),
            AccountError::LoginNotRecorded(e) => ApiError::LoginNotRecorded(e.to_string()),
            AccountError::Internal(msg) => ApiError::InternalServer(msg),
        }
    }
}

/// Helper function to convert ValidationResult to ApiError
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid() {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            ApiError::ValidationError(result.messages())
        }
    }
}
