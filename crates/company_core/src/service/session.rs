//! Session: one connection plus one identity map per entity type.
//!
//! # Invariants
//! - Within a session, each stored id maps to at most one handle per entity.
//! - Two sessions over the same connection never share handles.
//! - Traversals run a query on every call; results are not cached on the owner.

use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::review::Review;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::error::RepoResult;
use crate::repo::identity_map::Shared;
use crate::repo::review_repo::{ReviewLookup, SqliteReviewLookup};
use log::debug;
use rusqlite::Connection;

/// Explicit mapping scope over a shared connection.
pub struct Session<'conn> {
    conn: &'conn Connection,
    departments: DepartmentRepository<'conn>,
    employees: EmployeeRepository<'conn>,
}

impl<'conn> Session<'conn> {
    /// Starts a session with empty identity maps.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            departments: DepartmentRepository::new(conn),
            employees: EmployeeRepository::new(conn),
        }
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    pub fn departments(&mut self) -> &mut DepartmentRepository<'conn> {
        &mut self.departments
    }

    pub fn employees(&mut self) -> &mut EmployeeRepository<'conn> {
        &mut self.employees
    }

    /// Creates `departments` then `employees`; safe to repeat.
    pub fn create_tables(&self) -> RepoResult<()> {
        self.departments.create_table()?;
        self.employees.create_table()?;
        debug!("event=schema_create module=service status=ok");
        Ok(())
    }

    /// Drops `reviews`, `employees` and `departments`, clearing both identity maps.
    pub fn drop_tables(&mut self) -> RepoResult<()> {
        self.employees.drop_table()?;
        self.departments.drop_table()?;
        debug!("event=schema_drop module=service status=ok");
        Ok(())
    }

    /// Loads the employees of a department on demand.
    ///
    /// A transient department has no employees.
    pub fn department_employees(
        &mut self,
        department: &Department,
    ) -> RepoResult<Vec<Shared<Employee>>> {
        match department.id() {
            Some(id) => self.employees.find_by_department(id),
            None => Ok(Vec::new()),
        }
    }

    /// Loads the reviews of an employee from the `reviews` table.
    pub fn employee_reviews(&self, employee: &Employee) -> RepoResult<Vec<Review>> {
        self.employee_reviews_with(employee, &SqliteReviewLookup::new(self.conn))
    }

    /// Loads the reviews of an employee through a caller-provided lookup.
    ///
    /// A transient employee has no reviews.
    pub fn employee_reviews_with<L: ReviewLookup>(
        &self,
        employee: &Employee,
        lookup: &L,
    ) -> RepoResult<Vec<Review>> {
        match employee.id() {
            Some(id) => lookup.reviews_for_employee(id),
            None => Ok(Vec::new()),
        }
    }
}
