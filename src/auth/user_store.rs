//! Account Storage
//! Mission: Persist accounts with SQLite and surface unique-email conflicts distinctly

use crate::auth::models::Account;
use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{ffi, params, Connection};
use std::path::Path;
use thiserror::Error;
use tracing::info;

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Failures reported by an account store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already taken.
    #[error("email already registered")]
    Conflict,

    /// Any other backend failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Backend(err.into())
    }
}

/// Account persistence used by the credential service.
///
/// Implementations are called from blocking worker threads.
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Must return [`StoreError::Conflict`] when the
    /// email is already registered.
    fn create_account(&self, email: &str, password_hash: &str) -> Result<Account, StoreError>;

    /// Look up an account by email; `Ok(None)` when there is none.
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

/// Account storage with SQLite backend
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
}

impl SqliteAccountStore {
    /// Open (or create) the account database at `db_path`
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open account database at {}", db_path.display()))?;
        let store = Self::init(conn)?;
        let accounts = store.account_count()?;

        info!(path = %db_path.display(), accounts, "🔐 Account store ready");
        Ok(store)
    }

    /// Private in-memory database, gone when the store is dropped
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize account schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored accounts
    pub fn account_count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .context("Failed to count accounts")?;
        Ok(count)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl AccountStore for SqliteAccountStore {
    fn create_account(&self, email: &str, password_hash: &str) -> Result<Account, StoreError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock();

        match conn.execute(
            "INSERT INTO accounts (email, password_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![email, password_hash, now],
        ) {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(StoreError::Conflict),
            Err(e) => {
                let err = anyhow::Error::new(e).context("Failed to insert account");
                return Err(StoreError::Backend(err));
            }
        }

        Ok(Account {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare_cached(
            "SELECT id, email, password_hash, created_at, updated_at
             FROM accounts WHERE email = ?1
             ORDER BY id LIMIT 1",
        )?;

        let account_result = stmt.query_row(params![email], |row| {
            Ok(Account {
                id: row.get(0)?,
                email: row.get(1)?,
                password_hash: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        });

        match account_result {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
