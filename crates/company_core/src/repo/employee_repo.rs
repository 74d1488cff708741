//! Employee repository: `employees` table mapping and identity map.
//!
//! # Responsibility
//! - Own `employees` DDL and CRUD statements.
//! - Guard every department reference against storage before it is kept.
//!
//! # Invariants
//! - `department_id` is checked on construction, on reassignment and again
//!   right before each insert/update.
//! - A cached handle is returned as-is by lookups; row contents never overwrite it.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeId, EmployeeRow};
use crate::model::validation::ValidationError;
use crate::repo::department_repo::{department_exists, CREATE_DEPARTMENTS_SQL};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::identity_map::{shared, IdentityMap, Shared};
use log::{debug, warn};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::rc::Rc;

const ENTITY: &str = "employee";
const TABLE: &str = "employees";

const CREATE_EMPLOYEES_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    job_title TEXT NOT NULL,
    department_id INTEGER NOT NULL,
    FOREIGN KEY (department_id) REFERENCES departments(id)
);";

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, job_title, department_id FROM employees";

/// SQLite-backed employee repository with its own identity map.
pub struct EmployeeRepository<'conn> {
    conn: &'conn Connection,
    identity_map: IdentityMap<Employee>,
}

impl<'conn> EmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            identity_map: IdentityMap::new(),
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Employee> {
        &self.identity_map
    }

    /// Creates `departments` and `employees` if missing, in dependency order.
    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_DEPARTMENTS_SQL)?;
        self.conn.execute_batch(CREATE_EMPLOYEES_SQL)?;
        Ok(())
    }

    /// Drops `reviews` then `employees` if present, and clears the identity map.
    pub fn drop_table(&mut self) -> RepoResult<()> {
        self.conn.execute_batch(
            "DROP TABLE IF EXISTS reviews;
             DROP TABLE IF EXISTS employees;",
        )?;
        self.identity_map.clear();
        debug!("event=table_drop module=repo status=ok table={TABLE}");
        Ok(())
    }

    /// Constructs a transient employee.
    ///
    /// # Errors
    /// - `Validation(EmptyField)` when `name` or `job_title` is empty.
    /// - `Validation(MissingDepartment)` when `department_id` has no stored row.
    pub fn build(
        &self,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: DepartmentId,
    ) -> RepoResult<Employee> {
        let employee = Employee::new(name, job_title, department_id)?;
        self.ensure_department(department_id)?;
        Ok(employee)
    }

    /// Reassigns the department after checking it exists; the previous value
    /// is kept on failure.
    pub fn set_department_id(
        &self,
        employee: &mut Employee,
        department_id: DepartmentId,
    ) -> RepoResult<()> {
        self.ensure_department(department_id)?;
        employee.assign_department_id(department_id);
        Ok(())
    }

    /// Inserts a transient employee or updates all fields of a persistent one.
    ///
    /// The department reference is re-checked first, so a department removed
    /// after assignment is reported as a validation error.
    pub fn save(&mut self, employee: &Shared<Employee>) -> RepoResult<()> {
        let (current_id, department_id) = {
            let record = employee.borrow();
            (record.id(), record.department_id())
        };
        self.ensure_department(department_id)?;

        match current_id {
            None => {
                let new_id = {
                    let record = employee.borrow();
                    self.conn.execute(
                        "INSERT INTO employees (name, job_title, department_id)
                         VALUES (?1, ?2, ?3);",
                        params![record.name(), record.job_title(), record.department_id()],
                    )?;
                    self.conn.last_insert_rowid()
                };
                employee.borrow_mut().assign_id(Some(new_id));
                self.identity_map.insert(new_id, Rc::clone(employee));
                debug!("event=entity_save module=repo status=ok entity={ENTITY} op=insert id={new_id}");
            }
            Some(id) => {
                let changed = {
                    let record = employee.borrow();
                    let changed = self.conn.execute(
                        "UPDATE employees
                         SET name = ?1, job_title = ?2, department_id = ?3
                         WHERE id = ?4;",
                        params![
                            record.name(),
                            record.job_title(),
                            record.department_id(),
                            id
                        ],
                    )?;
                    changed
                };
                if changed == 0 {
                    warn!("event=entity_save module=repo status=error entity={ENTITY} op=update id={id} error_code=not_found");
                    return Err(RepoError::NotFound { entity: ENTITY, id });
                }
                debug!("event=entity_save module=repo status=ok entity={ENTITY} op=update id={id}");
            }
        }
        Ok(())
    }

    /// Constructs and saves an employee in one step.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: DepartmentId,
    ) -> RepoResult<Shared<Employee>> {
        let employee = shared(self.build(name, job_title, department_id)?);
        self.save(&employee)?;
        Ok(employee)
    }

    /// Returns the canonical handle for a stored row; cached handles win.
    pub fn materialize(&mut self, row: EmployeeRow) -> RepoResult<Shared<Employee>> {
        if let Some(cached) = self.identity_map.get(row.id) {
            return Ok(cached);
        }

        let id = row.id;
        let employee =
            Employee::from_row(row).map_err(|err| RepoError::invalid_row(TABLE, id, err))?;
        let handle = shared(employee);
        self.identity_map.insert(id, Rc::clone(&handle));
        Ok(handle)
    }

    pub fn find_by_id(&mut self, id: EmployeeId) -> RepoResult<Option<Shared<Employee>>> {
        match self.load_row(id)? {
            Some(row) => Ok(Some(self.materialize(row)?)),
            None => Ok(None),
        }
    }

    /// Returns the lowest-id employee with exactly this name.
    pub fn find_by_name(&mut self, name: &str) -> RepoResult<Option<Shared<Employee>>> {
        let row = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
                [name],
                read_employee_row,
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(self.materialize(row)?)),
            None => Ok(None),
        }
    }

    /// Returns every employee ordered by id.
    pub fn get_all(&mut self) -> RepoResult<Vec<Shared<Employee>>> {
        self.query_many(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"), None)
    }

    /// Returns every employee of one department ordered by id.
    pub fn find_by_department(
        &mut self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<Shared<Employee>>> {
        self.query_many(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE department_id = ?1 ORDER BY id ASC;"),
            Some(department_id),
        )
    }

    /// Deletes the stored row, evicts the handle and clears its id.
    ///
    /// Deleting a transient employee is a no-op.
    pub fn delete(&mut self, employee: &Shared<Employee>) -> RepoResult<()> {
        let Some(id) = employee.borrow().id() else {
            debug!("event=entity_delete module=repo status=skipped entity={ENTITY} reason=transient");
            return Ok(());
        };

        self.conn.execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        self.identity_map.remove(id);
        employee.borrow_mut().assign_id(None);
        debug!("event=entity_delete module=repo status=ok entity={ENTITY} id={id}");
        Ok(())
    }

    /// Reloads all fields of a persistent employee from storage.
    pub fn refresh(&self, employee: &Shared<Employee>) -> RepoResult<()> {
        let id = employee
            .borrow()
            .id()
            .ok_or(RepoError::NotPersisted { entity: ENTITY })?;
        let row = self
            .load_row(id)?
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;
        employee
            .borrow_mut()
            .overwrite_from(row)
            .map_err(|err| RepoError::invalid_row(TABLE, id, err))?;
        Ok(())
    }

    fn ensure_department(&self, department_id: DepartmentId) -> RepoResult<()> {
        if !department_exists(self.conn, department_id)? {
            return Err(ValidationError::MissingDepartment(department_id).into());
        }
        Ok(())
    }

    fn load_row(&self, id: EmployeeId) -> RepoResult<Option<EmployeeRow>> {
        let row = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_employee_row,
            )
            .optional()?;
        Ok(row)
    }

    fn query_many(
        &mut self,
        sql: &str,
        department_id: Option<DepartmentId>,
    ) -> RepoResult<Vec<Shared<Employee>>> {
        let rows = {
            let mut stmt = self.conn.prepare(sql)?;
            let mapped = stmt.query_map(params_from_iter(department_id), read_employee_row)?;
            mapped.collect::<rusqlite::Result<Vec<_>>>()?
        };

        rows.into_iter().map(|row| self.materialize(row)).collect()
    }
}

fn read_employee_row(row: &Row<'_>) -> rusqlite::Result<EmployeeRow> {
    Ok(EmployeeRow {
        id: row.get("id")?,
        name: row.get("name")?,
        job_title: row.get("job_title")?,
        department_id: row.get("department_id")?,
    })
}
