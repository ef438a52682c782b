//! Authentication Models
//! Mission: Define account, claim, and request/response data structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: Option<String>,
    /// Unique business key, stored lowercase.
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt digest - never serialize
    pub role: AccountRole,
    pub created_at: String,
}

/// Coarse-grained permission tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &str {
        match self {
            AccountRole::User => "user",
            AccountRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(AccountRole::User),
            "admin" => Some(AccountRole::Admin),
            _ => None,
        }
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub role: AccountRole,
    pub email: String,
    pub exp: usize, // expiration timestamp (seconds)
}

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token + public account view returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountView,
}

/// Public account view (sanitized - no hash, no phone).
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: String,
    pub email: String,
    pub role: AccountRole,
}

impl AccountView {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}
