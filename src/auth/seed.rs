//! Privileged-Account Seeder
//! Mission: Idempotently ensure configured admin accounts exist at startup

use crate::auth::{
    models::AccountRole,
    password,
    store::{AccountStore, AccountStoreError, NewAccount},
};
use tracing::{debug, info, warn};

/// A configured bootstrap admin entry.
#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Parse `ADMIN_ACCOUNTS` entries of the form
/// `email:password[:name],email:password[:name],...`.
///
/// Malformed entries are skipped with a warning rather than failing startup.
pub fn parse_admin_accounts(raw: &str) -> Vec<SeedAccount> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let email = parts.next().unwrap_or("").trim();
            let password = parts.next().unwrap_or("").trim();
            let name = parts.next().map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

            if email.is_empty() || password.is_empty() {
                warn!("Skipping malformed admin account entry: {:?}", entry);
                return None;
            }

            Some(SeedAccount {
                email: email.to_string(),
                password: password.to_string(),
                name,
            })
        })
        .collect()
}

/// Ensure each configured admin account exists.
///
/// Safe to run on every restart: existing accounts are left untouched.
/// Per-entry failures are logged and swallowed so seeding never prevents the
/// service from coming up; an admin that fails to seed is unreachable until
/// corrected.
pub fn seed_admins(store: &AccountStore, entries: &[SeedAccount]) -> usize {
    let mut seeded = 0;

    for entry in entries {
        match store.find_by_email(&entry.email) {
            Ok(Some(_)) => {
                debug!("Admin account already present: {}", entry.email);
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Admin seed lookup failed for {}: {}", entry.email, e);
                continue;
            }
        }

        let password_hash = match password::hash_password(&entry.password) {
            Ok(h) => h,
            Err(e) => {
                warn!("Admin seed hashing failed for {}: {}", entry.email, e);
                continue;
            }
        };

        match store.insert(NewAccount {
            name: entry.name.clone(),
            email: entry.email.clone(),
            phone: String::new(),
            password_hash,
            role: AccountRole::Admin,
        }) {
            Ok(_) => {
                info!("Seeded admin account: {}", entry.email);
                seeded += 1;
            }
            // Lost a race with a concurrent insert; the account exists.
            Err(AccountStoreError::DuplicateEmail) => {
                debug!("Admin account already present: {}", entry.email);
            }
            Err(e) => {
                warn!("Admin seed insert failed for {}: {}", entry.email, e);
            }
        }
    }

    seeded
}
