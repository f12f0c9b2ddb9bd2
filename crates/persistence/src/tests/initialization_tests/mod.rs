// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Connection setup, migrations and foreign key enforcement are exercised by
//! every test that calls `SqlitePersistence::new_in_memory()`. The tests here
//! cover the properties the rest of the suite relies on.

use crate::SqlitePersistence;

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, crate::error::PersistenceError> =
        SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqlitePersistence::new_in_memory().unwrap();
    let mut db2 = SqlitePersistence::new_in_memory().unwrap();

    db1.create_operator("op1", "Operator One", "password", "Admin")
        .unwrap();

    let count1 = db1.count_operators().unwrap();
    let count2 = db2.count_operators().unwrap();

    assert_eq!(count1, 1, "db1 should have 1 operator");
    assert_eq!(count2, 0, "db2 should have 0 operators (isolated)");
}

#[test]
fn test_file_database_survives_reopen() {
    let path = std::env::temp_dir().join(format!(
        "innkeep-init-test-{}.sqlite",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        persistence
            .create_operator("admin", "Admin", "password", "Admin")
            .unwrap();
    }

    let mut reopened = SqlitePersistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_operators().unwrap(), 1);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
}
