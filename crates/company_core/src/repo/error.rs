//! Repository error taxonomy.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from entity persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    /// Field or department-reference invariant violated.
    Validation(ValidationError),
    /// Underlying SQLite error, including raw constraint violations.
    Db(DbError),
    /// Update or refresh targeted an id with no stored row.
    NotFound { entity: &'static str, id: i64 },
    /// Operation needs a stored row but the instance is transient.
    NotPersisted { entity: &'static str },
    /// Stored row cannot be mapped onto a valid model.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn invalid_row(table: &str, id: i64, err: ValidationError) -> Self {
        Self::InvalidData(format!("invalid {table} row {id}: {err}"))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::NotPersisted { entity } => write!(f, "{entity} has not been saved yet"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::NotPersisted { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
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
