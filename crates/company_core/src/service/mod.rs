//! Use-case layer over the entity repositories.
//!
//! # Responsibility
//! - Scope identity maps to an explicit session instead of process-wide state.
//! - Own operations that cross entity boundaries (schema order, traversals).

pub mod session;
