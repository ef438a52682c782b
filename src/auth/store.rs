//! Account Repository
//! Mission: Keyed account storage with SQLite-enforced email uniqueness

use crate::auth::models::{Account, AccountRole};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Fields supplied by callers when creating an account; id and created_at
/// are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: AccountRole,
}

/// Account repository errors.
#[derive(Debug)]
pub enum AccountStoreError {
    /// An account with this normalized email already exists. Produced by the
    /// database UNIQUE constraint, which is the source of truth for the
    /// one-account-per-email invariant.
    DuplicateEmail,
    Database(rusqlite::Error),
}

impl fmt::Display for AccountStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStoreError::DuplicateEmail => write!(f, "Email already registered"),
            AccountStoreError::Database(e) => write!(f, "Account store error: {}", e),
        }
    }
}

impl std::error::Error for AccountStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccountStoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for AccountStoreError {
    fn from(e: rusqlite::Error) -> Self {
        AccountStoreError::Database(e)
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Account storage with SQLite backend.
pub struct AccountStore {
    db_path: String,
}

impl AccountStore {
    /// Create a new account store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self, AccountStoreError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<(), AccountStoreError> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                name TEXT,
                email TEXT UNIQUE NOT NULL,
                phone TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Look up an account by (normalized) email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountStoreError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, phone, password_hash, role, created_at
             FROM accounts WHERE email = ?1",
        )?;

        let result = stmt.query_row(params![normalize_email(email)], row_to_account);

        match result {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new account, assigning its id and creation timestamp.
    ///
    /// Fails with `DuplicateEmail` when the UNIQUE constraint fires; a race
    /// between two concurrent inserts for the same email resolves to exactly
    /// one success.
    pub fn insert(&self, new: NewAccount) -> Result<Account, AccountStoreError> {
        let account = Account {
            id: Uuid::new_v4(),
            name: new.name,
            email: normalize_email(&new.email),
            phone: new.phone,
            password_hash: new.password_hash,
            role: new.role,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        let result = conn.execute(
            "INSERT INTO accounts (id, name, email, phone, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                account.id.to_string(),
                account.name,
                account.email,
                account.phone,
                account.password_hash,
                account.role.as_str(),
                account.created_at,
            ],
        );

        match result {
            Ok(_) => {
                info!("Created account: {} ({})", account.email, account.role.as_str());
                Ok(account)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(AccountStoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let role_str: String = row.get(5)?;

    Ok(Account {
        id,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        password_hash: row.get(4)?,
        role: AccountRole::from_str(&role_str).unwrap_or(AccountRole::User),
        created_at: row.get(6)?,
    })
}
