//! SQLite backing file for the `kv_entries` state table.
//!
//! # Responsibility
//! - Open the state file (or an in-memory twin) with migrations applied.
//! - Report storage failures with a stable code for log lines.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or touching the state file.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a statement or could not reach the file.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build than this one.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection has no `kv_entries` table; it bypassed `open_db`.
    StateTableMissing,
}

impl DbError {
    /// Stable `error_code` value for `event=...` log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "state_db_sqlite",
            Self::SchemaTooNew { .. } => "state_db_schema_too_new",
            Self::StateTableMissing => "state_db_not_migrated",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "state file error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "state file uses schema v{found}; this build reads up to v{supported}"
            ),
            Self::StateTableMissing => {
                write!(f, "state file has no kv_entries table; open it with open_db")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
