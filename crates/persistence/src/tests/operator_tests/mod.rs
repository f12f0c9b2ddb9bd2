// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for operator and session persistence.

use time::Duration;

use super::NOW;
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_login_names_are_case_insensitive() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("frontdesk", "Front Desk", "password", "Staff")
        .unwrap();

    let operator = persistence
        .get_operator_by_login("FrontDesk")
        .unwrap()
        .unwrap();
    assert_eq!(operator.operator_id, operator_id);
    assert_eq!(operator.login_name, "FRONTDESK");
    assert_eq!(operator.role, "Staff");
}

#[test]
fn test_password_is_stored_hashed() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("admin", "Admin", "s3cret", "Admin")
        .unwrap();
    let operator = persistence.get_operator_by_id(operator_id).unwrap().unwrap();

    assert_ne!(operator.password_hash, "s3cret");
    assert!(persistence.verify_password("s3cret", &operator.password_hash).unwrap());
    assert!(!persistence.verify_password("wrong", &operator.password_hash).unwrap());
}

#[test]
fn test_duplicate_login_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence
        .create_operator("admin", "Admin", "password", "Admin")
        .unwrap();

    let result = persistence.create_operator("ADMIN", "Other", "password", "Staff");
    assert!(matches!(
        result,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "login_name"
    ));
}

#[test]
fn test_disable_and_enable_operator() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("testop", "Test Operator", "password", "Admin")
        .unwrap();
    assert_eq!(persistence.count_active_admin_operators().unwrap(), 1);

    persistence.disable_operator(operator_id, NOW).unwrap();
    let operator = persistence.get_operator_by_id(operator_id).unwrap().unwrap();
    assert!(operator.is_disabled);
    assert!(operator.disabled_at.is_some());
    assert_eq!(persistence.count_active_admin_operators().unwrap(), 0);

    persistence.enable_operator(operator_id, NOW).unwrap();
    let operator = persistence.get_operator_by_id(operator_id).unwrap().unwrap();
    assert!(!operator.is_disabled);
    assert!(operator.disabled_at.is_none());
}

#[test]
fn test_disable_unknown_operator_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.disable_operator(99, NOW),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_disabling_operator_ends_sessions() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("testop", "Test Operator", "password", "Staff")
        .unwrap();
    persistence
        .create_session("session_a", operator_id, NOW, NOW + Duration::days(30))
        .unwrap();

    persistence.disable_operator(operator_id, NOW).unwrap();

    assert!(persistence.get_session_by_token("session_a").unwrap().is_none());
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("testop", "Test Operator", "password", "Staff")
        .unwrap();
    let session_id = persistence
        .create_session("session_b", operator_id, NOW, NOW + Duration::days(30))
        .unwrap();

    let session = persistence.get_session_by_token("session_b").unwrap().unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.operator_id, operator_id);
    assert_eq!(session.expires_at, "2026-04-09T12:00:00Z");

    persistence
        .update_session_activity(session_id, NOW + Duration::hours(1))
        .unwrap();
    let session = persistence.get_session_by_token("session_b").unwrap().unwrap();
    assert_eq!(session.last_activity_at, "2026-03-10T13:00:00Z");

    persistence.delete_session("session_b").unwrap();
    assert!(persistence.get_session_by_token("session_b").unwrap().is_none());
}

#[test]
fn test_expired_sessions_are_purged() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("testop", "Test Operator", "password", "Staff")
        .unwrap();
    persistence
        .create_session("old", operator_id, NOW - Duration::days(40), NOW - Duration::days(10))
        .unwrap();
    persistence
        .create_session("fresh", operator_id, NOW, NOW + Duration::days(30))
        .unwrap();

    assert_eq!(persistence.delete_expired_sessions(NOW).unwrap(), 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("fresh").unwrap().is_some());
}
