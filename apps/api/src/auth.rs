use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use portfolio_content::secrets_match;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Proof that the request carried `Authorization: Bearer <ADMIN_TOKEN>`.
///
/// Put it before any body extractor so a rejected request is never parsed
/// or validated.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            Some(token) if secrets_match(token, &state.config.admin_token) => Ok(AdminAuth),
            Some(_) => {
                warn!("Rejected write to {}: bad bearer token", parts.uri.path());
                Err(AppError::Unauthorized)
            }
            None => {
                warn!("Rejected write to {}: missing bearer token", parts.uri.path());
                Err(AppError::Unauthorized)
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
