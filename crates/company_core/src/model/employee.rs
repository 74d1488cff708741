//! Employee domain model.
//!
//! # Invariants
//! - `name` and `job_title` are non-empty at all times.
//! - `department_id` referenced an existing department when it was assigned.
//!   Existence needs storage, so construction and reassignment of the
//!   department go through `EmployeeRepository`.

use crate::model::department::DepartmentId;
use crate::model::validation::{require_non_empty, ValidationError};
use serde::Serialize;

/// Primary key of the `employees` table.
pub type EmployeeId = i64;

const ENTITY: &str = "employee";

/// Person working in exactly one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: Option<EmployeeId>,
    name: String,
    job_title: String,
    department_id: DepartmentId,
}

/// Raw `employees` row as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    pub department_id: DepartmentId,
}

impl Employee {
    /// Creates a transient employee. Callers must have checked `department_id`.
    pub(crate) fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: DepartmentId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            name: require_non_empty(ENTITY, "name", name.into())?,
            job_title: require_non_empty(ENTITY, "job_title", job_title.into())?,
            department_id,
        })
    }

    pub(crate) fn from_row(row: EmployeeRow) -> Result<Self, ValidationError> {
        let mut employee = Self::new(row.name, row.job_title, row.department_id)?;
        employee.id = Some(row.id);
        Ok(employee)
    }

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn is_persistent(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces the name; the previous value is kept on failure.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = require_non_empty(ENTITY, "name", name.into())?;
        Ok(())
    }

    /// Replaces the job title; the previous value is kept on failure.
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<(), ValidationError> {
        self.job_title = require_non_empty(ENTITY, "job_title", job_title.into())?;
        Ok(())
    }

    pub(crate) fn assign_department_id(&mut self, department_id: DepartmentId) {
        self.department_id = department_id;
    }

    pub(crate) fn assign_id(&mut self, id: Option<EmployeeId>) {
        self.id = id;
    }

    pub(crate) fn overwrite_from(&mut self, row: EmployeeRow) -> Result<(), ValidationError> {
        *self = Self::from_row(row)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Employee;
    use crate::model::validation::ValidationError;

    #[test]
    fn empty_job_title_is_rejected() {
        let err = Employee::new("Ana", "", 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                entity: "employee",
                field: "job_title"
            }
        );
    }

    #[test]
    fn set_name_validates_every_assignment() {
        let mut employee = Employee::new("Ana", "Engineer", 1).unwrap();
        assert!(employee.set_name("").is_err());
        assert_eq!(employee.name(), "Ana");
        employee.set_job_title("Staff Engineer").unwrap();
        assert_eq!(employee.job_title(), "Staff Engineer");
    }
}
