//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, request::Parts};
use axum::extract::FromRequestParts;
use tracing::warn;

use crate::common::ApiError;

/// Raw bearer token taken from the `Authorization` header
///
/// Accepts `Bearer <token>` or the bare token. Only extraction happens here;
/// the account service verifies the token.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let header = match header {
            Some(h) => h,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized(
                    "Missing authorization token".to_string(),
                ));
            }
        };

        let bare_token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        Ok(BearerToken(bare_token.to_string()))
    }
}
