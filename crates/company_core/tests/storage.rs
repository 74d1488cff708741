use company_core::db::{foreign_keys_enabled, open_db, open_db_in_memory};
use company_core::{Session, DEFAULT_DB_FILE_NAME};

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    assert!(foreign_keys_enabled(&conn).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join(DEFAULT_DB_FILE_NAME)).unwrap();
    assert!(foreign_keys_enabled(&conn).unwrap());
}

#[test]
fn raw_foreign_key_violation_surfaces_as_storage_error() {
    let conn = open_db_in_memory().unwrap();
    Session::new(&conn).create_tables().unwrap();

    let result = conn.execute(
        "INSERT INTO employees (name, job_title, department_id) VALUES ('Ana', 'Engineer', 42);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn rows_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE_NAME);

    {
        let conn = open_db(&path).unwrap();
        let mut session = Session::new(&conn);
        session.create_tables().unwrap();
        session
            .departments()
            .create("Engineering", "Building A")
            .unwrap();
        session.employees().create("Ana", "Engineer", 1).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let mut session = Session::new(&conn);
    session.create_tables().unwrap();

    let department = session.departments().find_by_id(1).unwrap().unwrap();
    assert_eq!(department.borrow().name(), "Engineering");
    let employees = session.department_employees(&department.borrow()).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].borrow().name(), "Ana");
}

#[test]
fn default_file_name_is_stable() {
    assert_eq!(DEFAULT_DB_FILE_NAME, "company.db");
}
