//! Application configuration
//! Mission: Resolve all process-wide settings from the environment at startup

use crate::auth::seed::{parse_admin_accounts, SeedAccount};
use anyhow::{bail, Result};
use std::env;

/// Process-wide configuration, established once at startup and passed
/// explicitly into the services that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Signing secret for identity tokens. Required - the process refuses
    /// to start without it.
    pub jwt_secret: String,
    /// Token lifetime in days (default 30).
    pub token_lifetime_days: i64,
    /// Privileged bootstrap accounts ensured by the seeder.
    pub admin_accounts: Vec<SeedAccount>,
    /// Fixed-window rate limit: max requests per minute per IP.
    pub rate_limit_per_minute: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .unwrap_or(4000);

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./risingherb.db".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(s) if !s.trim().is_empty() => s,
            _ => bail!("JWT_SECRET not set - refusing to start without a signing secret"),
        };

        let token_lifetime_days = env::var("TOKEN_LIFETIME_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&d| d > 0)
            .unwrap_or(30);

        let admin_accounts = env::var("ADMIN_ACCOUNTS")
            .map(|raw| parse_admin_accounts(&raw))
            .unwrap_or_default();

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(200);

        Ok(Self {
            port,
            database_path,
            jwt_secret,
            token_lifetime_days,
            admin_accounts,
            rate_limit_per_minute,
        })
    }
}
