use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{AppState, error::AppError};

/// Gate for protected routes: the `Authorization` header must carry exactly
/// `Bearer <token>` for the configured static token. Add it as a handler
/// parameter to require the check; any failure rejects with 403 and the
/// unauthorized body.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth;

impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").map(str::trim).ok_or(AppError::Unauthorized)?;

        if token != state.config.api_token {
            return Err(AppError::Unauthorized);
        }

        Ok(RequireAuth)
    }
}
