// src/profile/routes.rs

use axum::{routing::get, Router};

use super::handlers::profile;

/// # Routes
/// - `GET /profile` - The caller's name and phone number
/// - `PUT /profile` - Partial update of phone number and/or full name
pub fn profile_routes() -> Router {
    Router::new().route(
        "/profile",
        get(profile::profile_handler).put(profile::update_profile_handler),
    )
}
