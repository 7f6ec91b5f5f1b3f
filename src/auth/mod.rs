//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Credential validation rules for registration
//! - Argon2id password hashing and verification
//! - JWT token issuance and validation
//! - BearerToken extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod token;
pub mod validators;


pub use extractors::BearerToken;
pub use routes::auth_routes;
