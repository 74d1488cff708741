//! Read-only access to the external `reviews` table.
//!
//! # Responsibility
//! - Resolve the employee-to-reviews traversal through a narrow trait seam.
//! - Provide a SQLite implementation keyed by `employee_id`.
//!
//! # Invariants
//! - Reviews are plain values; they are not tracked by any identity map.

use crate::model::employee::EmployeeId;
use crate::model::review::Review;
use crate::repo::error::RepoResult;
use rusqlite::{Connection, Row};

const CREATE_REVIEWS_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INTEGER NOT NULL,
    summary TEXT NOT NULL,
    employee_id INTEGER NOT NULL,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
);";

/// Source of reviews attached to an employee.
pub trait ReviewLookup {
    /// Returns all reviews whose `employee_id` matches, ordered by id.
    fn reviews_for_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed review lookup over the `reviews` table.
pub struct SqliteReviewLookup<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewLookup<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates `reviews` if missing. Requires `employees` to exist for the FK to resolve.
    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_REVIEWS_SQL)?;
        Ok(())
    }
}

impl ReviewLookup for SqliteReviewLookup<'_> {
    fn reviews_for_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, year, summary, employee_id
             FROM reviews
             WHERE employee_id = ?1
             ORDER BY id ASC;",
        )?;
        let reviews = stmt
            .query_map([employee_id], read_review_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reviews)
    }
}

fn read_review_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get("id")?,
        year: row.get("year")?,
        summary: row.get("summary")?,
        employee_id: row.get("employee_id")?,
    })
}
