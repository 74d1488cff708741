//! Field validation shared by every entity.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failures raised on construction, assignment or save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A text field was assigned an empty string.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// `department_id` does not reference a stored department.
    MissingDepartment(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity} {field} must be a non-empty string")
            }
            Self::MissingDepartment(id) => write!(
                f,
                "department_id {id} must reference an existing department"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_non_empty(
    entity: &'static str,
    field: &'static str,
    value: String,
) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{require_non_empty, ValidationError};

    #[test]
    fn empty_value_is_rejected_with_field_context() {
        let err = require_non_empty("department", "name", String::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                entity: "department",
                field: "name"
            }
        );
        assert_eq!(err.to_string(), "department name must be a non-empty string");
    }

    #[test]
    fn whitespace_counts_as_content() {
        assert_eq!(
            require_non_empty("employee", "job_title", " ".to_string()).unwrap(),
            " "
        );
    }
}
