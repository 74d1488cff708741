//! Read model for employee reviews.
//!
//! Reviews belong to an external collaborator; core only reads them by
//! `employee_id` for the employee-to-reviews traversal.

use crate::model::employee::EmployeeId;
use serde::Serialize;

/// One stored performance review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: i64,
    pub year: i64,
    pub summary: String,
    pub employee_id: EmployeeId,
}
