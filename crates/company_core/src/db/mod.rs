//! SQLite storage handle for the company core.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection shared by every entity.
//! - Expose connection-level diagnostics used by callers and tests.
//!
//! # Invariants
//! - Every returned connection has `foreign_keys=ON` for its whole lifetime.
//! - Statements run in auto-commit mode; there are no cross-statement transactions.
//! - Schema is owned by entity repositories (`create_table`/`drop_table`), not here.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{foreign_keys_enabled, open_db, open_db_in_memory};

/// File name used when callers do not pick their own database path.
pub const DEFAULT_DB_FILE_NAME: &str = "company.db";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
