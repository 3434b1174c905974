use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{
    auth::{
        jwt::{JwtKeys, TokenError},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

/// Resolved identity for a protected request.
///
/// Extraction is the single authentication gate: it reads the
/// `Authorization` header, verifies the token, and resolves the embedded
/// user id against the credential store, so a handler that takes a
/// `CurrentUser` can trust it completely and never re-derives identity.
/// The gate only reads; it never mutates state.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        // Expected shape: "Bearer <token>"
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::MissingToken)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| match e {
            TokenError::Expired => {
                warn!("expired token");
                ApiError::ExpiredToken
            }
            TokenError::Invalid => {
                warn!("invalid token");
                ApiError::InvalidToken
            }
        })?;

        // A token can outlive its account; re-check the store every time.
        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token for unknown user");
                ApiError::UserNotFound
            })?;

        Ok(CurrentUser(user))
    }
}
