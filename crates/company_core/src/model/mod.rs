//! Domain model for departments, employees and their reviews.
//!
//! # Responsibility
//! - Define the in-memory records mapped onto `departments`/`employees` rows.
//! - Enforce field invariants at construction and on every assignment.
//!
//! # Invariants
//! - A record with `id == None` is transient; `Some(id)` mirrors a stored row.
//! - Text fields are never empty, even transiently.

pub mod department;
pub mod employee;
pub mod review;
pub mod validation;
