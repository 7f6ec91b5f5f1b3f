//! Registration and login handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::info;

use super::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::common::{safe_phone_log, ApiError, AppState};

/// POST /register
/// Creates a user account. No token is issued.
///
/// # Request Body
/// ```json
/// {
///   "phone_number": "+6281234567890",
///   "full_name": "Jane Doe",
///   "password": "Secr3t!"
/// }
/// ```
///
/// # Response
/// ```json
/// { "id": 1 }
/// ```
pub async fn register_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    info!(
        phone_number = %safe_phone_log(&payload.phone_number),
        "📝 Received registration request"
    );

    let id = state.accounts.register(payload).await?;
    Ok(Json(RegisterResponse { id }))
}

/// POST /login
/// Exchanges phone number and password for a bearer token
///
/// # Response
/// ```json
/// { "id": 1, "token": "<jwt token>" }
/// ```
pub async fn login_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!(
        phone_number = %safe_phone_log(&payload.phone_number),
        "🔐 Received login request"
    );

    let response = state
        .accounts
        .login(&payload.phone_number, &payload.password)
        .await?;
    Ok(Json(response))
}
