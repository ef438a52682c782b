//! Token Service
//! Mission: Issue and verify signed, self-contained identity tokens

use crate::auth::models::{AccountRole, Claims};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

const DEFAULT_LIFETIME_DAYS: i64 = 30;

/// Issues and verifies HS256 identity tokens.
///
/// Tokens are stateless - no server-side store of issued tokens exists, and
/// expiration is the only revocation mechanism.
pub struct TokenService {
    secret: String,
    lifetime_days: i64,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            lifetime_days: DEFAULT_LIFETIME_DAYS,
        }
    }

    pub fn with_lifetime_days(mut self, days: i64) -> Self {
        self.lifetime_days = days;
        self
    }

    /// Issue a token carrying the account id, role, and email, expiring
    /// `lifetime_days` from now.
    pub fn issue(&self, account_id: Uuid, role: AccountRole, email: &str) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::days(self.lifetime_days))
            .context("Invalid expiration timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: account_id.to_string(),
            role,
            email: email.to_string(),
            exp: expiration,
        };

        debug!(
            "Issuing token for {} ({}), expires in {}d",
            email, account_id, self.lifetime_days
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    /// Verify a token's signature and expiry and extract its claims.
    ///
    /// Malformed, tampered, wrong-key, and expired tokens all produce an
    /// error - never a panic.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        // No leeway: a token is invalid strictly after its expiration instant.
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid or expired token")?;

        Ok(decoded.claims)
    }
}
