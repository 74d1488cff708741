//! Department repository: `departments` table mapping and identity map.
//!
//! # Responsibility
//! - Own `departments` DDL and CRUD statements.
//! - Materialize rows into canonical `Shared<Department>` handles.
//!
//! # Invariants
//! - A cached handle is returned as-is by lookups; row contents never overwrite it.
//! - `delete` evicts and clears the id only after the row is gone.

use crate::model::department::{Department, DepartmentId, DepartmentRow};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::identity_map::{shared, IdentityMap, Shared};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::rc::Rc;

const ENTITY: &str = "department";
const TABLE: &str = "departments";

pub(crate) const CREATE_DEPARTMENTS_SQL: &str = "CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT NOT NULL
);";

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, location FROM departments";

/// SQLite-backed department repository with its own identity map.
pub struct DepartmentRepository<'conn> {
    conn: &'conn Connection,
    identity_map: IdentityMap<Department>,
}

impl<'conn> DepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            identity_map: IdentityMap::new(),
        }
    }

    /// Read access to the cached instances.
    pub fn identity_map(&self) -> &IdentityMap<Department> {
        &self.identity_map
    }

    /// Creates `departments` if missing. Existing rows are untouched.
    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_DEPARTMENTS_SQL)?;
        Ok(())
    }

    /// Drops `departments` if present and clears the identity map.
    ///
    /// Handles obtained earlier stay valid but are no longer tracked.
    pub fn drop_table(&mut self) -> RepoResult<()> {
        self.conn
            .execute_batch("DROP TABLE IF EXISTS departments;")?;
        self.identity_map.clear();
        debug!("event=table_drop module=repo status=ok table={TABLE}");
        Ok(())
    }

    /// Inserts a transient department or updates all fields of a persistent one.
    ///
    /// # Errors
    /// - `NotFound` when updating an id that has no stored row.
    pub fn save(&mut self, department: &Shared<Department>) -> RepoResult<()> {
        let current_id = department.borrow().id();
        match current_id {
            None => {
                let new_id = {
                    let record = department.borrow();
                    self.conn.execute(
                        "INSERT INTO departments (name, location) VALUES (?1, ?2);",
                        params![record.name(), record.location()],
                    )?;
                    self.conn.last_insert_rowid()
                };
                department.borrow_mut().assign_id(Some(new_id));
                self.identity_map.insert(new_id, Rc::clone(department));
                debug!("event=entity_save module=repo status=ok entity={ENTITY} op=insert id={new_id}");
            }
            Some(id) => {
                let changed = {
                    let record = department.borrow();
                    let changed = self.conn.execute(
                        "UPDATE departments SET name = ?1, location = ?2 WHERE id = ?3;",
                        params![record.name(), record.location(), id],
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

    /// Constructs and saves a department in one step.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> RepoResult<Shared<Department>> {
        let department = shared(Department::new(name, location)?);
        self.save(&department)?;
        Ok(department)
    }

    /// Returns the canonical handle for a stored row.
    ///
    /// When the id is already cached, the cached handle is returned unchanged
    /// and the row contents are ignored.
    pub fn materialize(&mut self, row: DepartmentRow) -> RepoResult<Shared<Department>> {
        if let Some(cached) = self.identity_map.get(row.id) {
            return Ok(cached);
        }

        let id = row.id;
        let department =
            Department::from_row(row).map_err(|err| RepoError::invalid_row(TABLE, id, err))?;
        let handle = shared(department);
        self.identity_map.insert(id, Rc::clone(&handle));
        Ok(handle)
    }

    pub fn find_by_id(&mut self, id: DepartmentId) -> RepoResult<Option<Shared<Department>>> {
        match self.load_row(id)? {
            Some(row) => Ok(Some(self.materialize(row)?)),
            None => Ok(None),
        }
    }

    /// Returns the lowest-id department with exactly this name.
    pub fn find_by_name(&mut self, name: &str) -> RepoResult<Option<Shared<Department>>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
                [name],
                read_department_row,
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(self.materialize(row)?)),
            None => Ok(None),
        }
    }

    /// Returns every department ordered by id.
    pub fn get_all(&mut self) -> RepoResult<Vec<Shared<Department>>> {
        let rows = {
            let mut stmt = self
                .conn
                .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;
            let mapped = stmt.query_map([], read_department_row)?;
            mapped.collect::<rusqlite::Result<Vec<_>>>()?
        };

        rows.into_iter().map(|row| self.materialize(row)).collect()
    }

    /// Deletes the stored row, evicts the handle and clears its id.
    ///
    /// Deleting a transient department is a no-op. A department still
    /// referenced by employees fails with the raw foreign-key error.
    pub fn delete(&mut self, department: &Shared<Department>) -> RepoResult<()> {
        let Some(id) = department.borrow().id() else {
            debug!("event=entity_delete module=repo status=skipped entity={ENTITY} reason=transient");
            return Ok(());
        };

        self.conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        self.identity_map.remove(id);
        department.borrow_mut().assign_id(None);
        debug!("event=entity_delete module=repo status=ok entity={ENTITY} id={id}");
        Ok(())
    }

    /// Reloads all fields of a persistent department from storage.
    pub fn refresh(&self, department: &Shared<Department>) -> RepoResult<()> {
        let id = department
            .borrow()
            .id()
            .ok_or(RepoError::NotPersisted { entity: ENTITY })?;
        let row = self
            .load_row(id)?
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;
        department
            .borrow_mut()
            .overwrite_from(row)
            .map_err(|err| RepoError::invalid_row(TABLE, id, err))?;
        Ok(())
    }

    /// Returns whether a department row with this id exists.
    pub fn exists(&self, id: DepartmentId) -> RepoResult<bool> {
        department_exists(self.conn, id)
    }

    fn load_row(&self, id: DepartmentId) -> RepoResult<Option<DepartmentRow>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_department_row,
            )
            .optional()?;
        Ok(row)
    }
}

pub(crate) fn department_exists(conn: &Connection, id: DepartmentId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM departments WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn read_department_row(row: &Row<'_>) -> rusqlite::Result<DepartmentRow> {
    Ok(DepartmentRow {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
    })
}
