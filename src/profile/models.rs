// src/profile/models.rs

use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Models
// ============================================================================

/// The caller's own profile. Never carries the password hash or login count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileResponse {
    pub name: String,
    pub phone_number: String,
}

/// Partial update payload; an absent field is left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
}
