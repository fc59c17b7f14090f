//! Card persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide whole-document read/write APIs for the persisted card
//!   collection and the vault credential.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The collection document and credential live under fixed, versioned
//!   state keys; a future incompatible schema gets a new key.
//! - Every write replaces the full stored value; there are no partial
//!   or delta writes.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// State key for the persisted card collection document.
///
/// The version suffix is part of the key so incompatible future schemas
/// do not silently collide with old data.
pub const COLLECTION_STATE_KEY: &str = "cards.v1";

/// State key for the stored password-verification token.
pub const CREDENTIAL_STATE_KEY: &str = "vault.credential";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for durable-state access.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} has no applied migrations (expected {expected_version})"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable-state access contract for the card store.
///
/// `None` reads mean "never persisted"; callers own recovery semantics.
pub trait CardRepository {
    fn load_collection(&self) -> RepoResult<Option<String>>;
    fn save_collection(&self, document: &str) -> RepoResult<()>;
    fn load_credential(&self) -> RepoResult<Option<String>>;
    fn save_credential(&self, token: &str) -> RepoResult<()>;
}

/// SQLite-backed repository over the `app_state` key/value table.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    /// Validates the connection schema and wraps it.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were never applied.
    /// - `MissingRequiredTable` when `app_state` is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version,
            });
        }

        let table_present = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'app_state';",
            [],
            |row| row.get::<_, i64>(0),
        )?;
        if table_present == 0 {
            return Err(RepoError::MissingRequiredTable("app_state"));
        }

        Ok(Self { conn })
    }

    fn read_state(&self, key: &str) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1;")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn write_state(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn load_collection(&self) -> RepoResult<Option<String>> {
        self.read_state(COLLECTION_STATE_KEY)
    }

    fn save_collection(&self, document: &str) -> RepoResult<()> {
        self.write_state(COLLECTION_STATE_KEY, document)
    }

    fn load_credential(&self) -> RepoResult<Option<String>> {
        self.read_state(CREDENTIAL_STATE_KEY)
    }

    fn save_credential(&self, token: &str) -> RepoResult<()> {
        self.write_state(CREDENTIAL_STATE_KEY, token)
    }
}
