//! Authenticator Middleware & Authorization Gate
//! Mission: Derive per-request identity from bearer tokens and enforce roles

use crate::auth::{api::AuthApiError, jwt::TokenService, models::AccountRole};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

/// Verified identity attached to a request for the duration of one request.
/// Never persisted; discarded with the response.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: String,
    pub role: AccountRole,
    pub email: String,
}

/// Authenticator middleware for protected routes.
///
/// Extracts the bearer token, verifies it, and attaches the identity to the
/// request extensions. No database access occurs here - identity is derived
/// purely from token claims.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(AuthApiError::Unauthenticated)?;

    let claims = tokens
        .verify(token)
        .map_err(|_| AuthApiError::Unauthenticated)?;

    req.extensions_mut().insert(AuthContext {
        account_id: claims.sub,
        role: claims.role,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Authorization gate requiring the admin role.
///
/// Runs strictly after `require_auth` and reads the identity it attached;
/// it never re-derives identity itself.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthApiError> {
    let ctx = req
        .extensions()
        .get::<AuthContext>()
        .ok_or(AuthApiError::Unauthenticated)?;

    if ctx.role != AccountRole::Admin {
        warn!("Forbidden admin access attempt by {}", ctx.email);
        return Err(AuthApiError::Forbidden);
    }

    Ok(next.run(req).await)
}
