//! Repository layer: SQL mapping plus per-entity identity maps.
//!
//! # Responsibility
//! - Own table DDL and row <-> object mapping for each entity.
//! - Hand out one canonical `Shared<T>` per stored id within a repository.
//!
//! # Invariants
//! - Write paths validate fields (and department references) before SQL mutations.
//! - Read paths reject rows that violate model invariants instead of masking them.
//! - Cached instances win over freshly read rows; only `refresh` reloads fields.

pub mod department_repo;
pub mod employee_repo;
pub mod error;
pub mod identity_map;
pub mod review_repo;
