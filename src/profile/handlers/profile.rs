// src/profile/handlers/profile.rs

use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use tracing::{info, warn};

use super::super::models::{ProfileResponse, UpdateProfileRequest, UpdateProfileResponse};
use crate::auth::BearerToken;
use crate::common::{ApiError, AppState};

pub const PROFILE_UPDATED_MESSAGE: &str = "User profile updated successfully";

/// GET /profile - Get the caller's profile
pub async fn profile_handler(
    Extension(state): Extension<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.accounts.get_profile(&token).await?;
    Ok(Json(profile))
}

/// PUT /profile - Update the caller's phone number and/or full name
///
/// # Request Body
/// ```json
/// {
///   "phone_number": "+6281234567890",
///   "full_name": "Jane Doe"
/// }
/// ```
/// Either field may be omitted. The token is verified before the body is
/// looked at, so an unauthenticated caller always gets 401.
pub async fn update_profile_handler(
    Extension(state): Extension<Arc<AppState>>,
    BearerToken(token): BearerToken,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let user_id = state.accounts.authenticate(&token)?;

    let Json(request) = payload.map_err(|rejection| {
        warn!(user_id, error = %rejection.body_text(), "Unreadable profile update body");
        ApiError::ValidationError(vec![rejection.body_text()])
    })?;

    info!(
        user_id,
        has_phone_number = request.phone_number.is_some(),
        has_full_name = request.full_name.is_some(),
        "Profile update request received"
    );

    state
        .accounts
        .update_profile(
            &token,
            request.phone_number.as_deref(),
            request.full_name.as_deref(),
        )
        .await?;

    Ok(Json(UpdateProfileResponse {
        message: PROFILE_UPDATED_MESSAGE.to_string(),
    }))
}
