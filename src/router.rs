// src/router.rs
//! Router composition shared by the server and the HTTP tests

use axum::{extract::Extension, middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::common::AppState;
use crate::{auth, logging_middleware, profile};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES (Register, Login)
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // PROFILE ROUTES (Get, Update)
        // ====================================================================
        .merge(profile::profile_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
