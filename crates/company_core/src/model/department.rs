//! Department domain model.
//!
//! # Invariants
//! - `name` and `location` are non-empty at all times.
//! - `id` is assigned by storage; callers never pick it.

use crate::model::validation::{require_non_empty, ValidationError};
use serde::Serialize;

/// Primary key of the `departments` table.
pub type DepartmentId = i64;

const ENTITY: &str = "department";

/// Organizational unit owning a set of employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: Option<DepartmentId>,
    name: String,
    location: String,
}

/// Raw `departments` row as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: DepartmentId,
    pub name: String,
    pub location: String,
}

impl Department {
    /// Creates a transient department.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` when `name` or `location` is empty.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            name: require_non_empty(ENTITY, "name", name.into())?,
            location: require_non_empty(ENTITY, "location", location.into())?,
        })
    }

    /// Builds a persistent department from a stored row, re-checking field invariants.
    pub(crate) fn from_row(row: DepartmentRow) -> Result<Self, ValidationError> {
        let mut department = Self::new(row.name, row.location)?;
        department.id = Some(row.id);
        Ok(department)
    }

    pub fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Replaces the name; the previous value is kept on failure.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = require_non_empty(ENTITY, "name", name.into())?;
        Ok(())
    }

    /// Replaces the location; the previous value is kept on failure.
    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), ValidationError> {
        self.location = require_non_empty(ENTITY, "location", location.into())?;
        Ok(())
    }

    /// Returns whether this instance mirrors a stored row.
    pub fn is_persistent(&self) -> bool {
        self.id.is_some()
    }

    pub(crate) fn assign_id(&mut self, id: Option<DepartmentId>) {
        self.id = id;
    }

    pub(crate) fn overwrite_from(&mut self, row: DepartmentRow) -> Result<(), ValidationError> {
        let fresh = Self::from_row(row)?;
        *self = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Department, DepartmentRow};
    use crate::model::validation::ValidationError;

    #[test]
    fn new_department_is_transient() {
        let department = Department::new("Engineering", "Building A").unwrap();
        assert_eq!(department.id(), None);
        assert!(!department.is_persistent());
        assert_eq!(department.name(), "Engineering");
        assert_eq!(department.location(), "Building A");
    }

    #[test]
    fn empty_fields_are_rejected_on_construction() {
        assert!(matches!(
            Department::new("", "Building A"),
            Err(ValidationError::EmptyField { field: "name", .. })
        ));
        assert!(matches!(
            Department::new("Engineering", ""),
            Err(ValidationError::EmptyField {
                field: "location",
                ..
            })
        ));
    }

    #[test]
    fn failed_assignment_keeps_previous_value() {
        let mut department = Department::new("Engineering", "Building A").unwrap();
        assert!(department.set_location("").is_err());
        assert_eq!(department.location(), "Building A");

        department.set_name("Platform").unwrap();
        assert_eq!(department.name(), "Platform");
    }

    #[test]
    fn from_row_carries_id() {
        let department = Department::from_row(DepartmentRow {
            id: 7,
            name: "Sales".to_string(),
            location: "Building B".to_string(),
        })
        .unwrap();
        assert_eq!(department.id(), Some(7));
    }
}
