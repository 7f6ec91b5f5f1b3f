// src/accounts/error.rs

use thiserror::Error;

use crate::auth::token::TokenError;
use crate::users::StoreError;

/// Failures of the account use cases
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Unknown phone number and wrong password both end up here
    #[error("invalid phone number or password")]
    InvalidCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(TokenError),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("user not found")]
    NotFound,

    #[error("persistence failure: {0}")]
    Persistence(StoreError),

    /// Credentials were accepted but the login counter could not be updated
    #[error("login could not be recorded: {0}")]
    LoginNotRecorded(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AccountError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(msg) => AccountError::Internal(msg),
            other => AccountError::Unauthorized(other),
        }
    }
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AccountError::NotFound,
            other => AccountError::Persistence(other),
        }
    }
}
