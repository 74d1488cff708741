//! Core object-relational mapping for departments and employees.
//!
//! Departments and employees are mapped onto two SQLite tables. A `Session`
//! scopes one identity map per entity type, so each stored row has exactly one
//! in-memory handle for the session's lifetime.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId, DepartmentRow};
pub use model::employee::{Employee, EmployeeId, EmployeeRow};
pub use model::review::Review;
pub use model::validation::ValidationError;
pub use repo::department_repo::DepartmentRepository;
pub use repo::employee_repo::EmployeeRepository;
pub use repo::error::{RepoError, RepoResult};
pub use repo::identity_map::{shared, IdentityMap, Shared};
pub use repo::review_repo::{ReviewLookup, SqliteReviewLookup};
pub use service::session::Session;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
