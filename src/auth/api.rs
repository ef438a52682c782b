//! Authentication API Endpoints
//! Mission: Registration and login flows producing identity tokens

use crate::auth::{
    jwt::TokenService,
    middleware::AuthContext,
    models::{AccountRole, AccountView, AuthResponse, LoginRequest, SignupRequest},
    password,
    store::{AccountStore, AccountStoreError, NewAccount},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

const MIN_PASSWORD_LEN: usize = 6;
const MAX_NAME_LEN: usize = 100;

/// Shared auth state.
#[derive(Clone)]
pub struct AuthState {
    pub accounts: Arc<AccountStore>,
    pub tokens: Arc<TokenService>,
}

/// Signup endpoint - POST /api/auth/signup
pub async fn signup(
    State(state): State<AuthState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthApiError> {
    validate_signup(&payload)?;

    // Fast-path duplicate check; the store's UNIQUE constraint is the actual
    // enforcement mechanism for concurrent registrations.
    let existing = state
        .accounts
        .find_by_email(&payload.email)
        .map_err(internal)?;
    if existing.is_some() {
        return Err(AuthApiError::DuplicateAccount);
    }

    let password_hash = password::hash_password(&payload.password).map_err(internal)?;

    let account = match state.accounts.insert(NewAccount {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        password_hash,
        role: AccountRole::User,
    }) {
        Ok(account) => account,
        Err(AccountStoreError::DuplicateEmail) => return Err(AuthApiError::DuplicateAccount),
        Err(e) => return Err(internal(e)),
    };

    let token = state
        .tokens
        .issue(account.id, account.role, &account.email)
        .map_err(internal)?;

    info!("Account registered: {}", account.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: AccountView::from_account(&account),
        }),
    ))
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthApiError> {
    if payload.email.trim().is_empty() {
        return Err(AuthApiError::Validation("email is required".to_string()));
    }
    if payload.password.is_empty() {
        return Err(AuthApiError::Validation("password is required".to_string()));
    }

    // Unknown email and wrong password produce the identical response so the
    // outcome carries no account-enumeration signal.
    let account = state
        .accounts
        .find_by_email(&payload.email)
        .map_err(internal)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    if !password::verify_password(&payload.password, &account.password_hash) {
        warn!("Failed login attempt: {}", account.email);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(account.id, account.role, &account.email)
        .map_err(internal)?;

    info!("Login successful: {} ({})", account.email, account.role.as_str());

    Ok(Json(AuthResponse {
        token,
        user: AccountView::from_account(&account),
    }))
}

/// Current identity - GET /api/auth/me
///
/// Built entirely from the verified token claims; no repository round-trip.
pub async fn get_current_user(Extension(ctx): Extension<AuthContext>) -> Json<AccountView> {
    Json(AccountView {
        id: ctx.account_id,
        email: ctx.email,
        role: ctx.role,
    })
}

fn validate_signup(payload: &SignupRequest) -> Result<(), AuthApiError> {
    if let Some(name) = &payload.name {
        if name.len() > MAX_NAME_LEN {
            return Err(AuthApiError::Validation(format!(
                "name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }
    }
    if !is_valid_email(&payload.email) {
        return Err(AuthApiError::Validation("email must be a valid email".to_string()));
    }
    if payload.phone.trim().is_empty() {
        return Err(AuthApiError::Validation("phone is required".to_string()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AuthApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
        && !email[local.len() + 1..].contains('@')
}

fn internal<E: std::fmt::Display>(e: E) -> AuthApiError {
    // Detail is logged server-side only, never sent to the client.
    error!("Auth internal error: {}", e);
    AuthApiError::Internal
}

/// Auth API errors, translated to responses at the boundary.
#[derive(Debug)]
pub enum AuthApiError {
    Validation(String),
    DuplicateAccount,
    InvalidCredentials,
    Unauthenticated,
    Forbidden,
    Internal,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthApiError::DuplicateAccount => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_string())
            }
            AuthApiError::Forbidden => {
                (StatusCode::FORBIDDEN, "Insufficient permissions".to_string())
            }
            AuthApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
