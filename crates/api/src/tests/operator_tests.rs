// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bootstrap, login and operator management.

use innkeep_persistence::SqlitePersistence;

use super::helpers::{create_test_admin, create_test_staff, now};
use crate::error::ApiError;
use crate::handlers::auth::{
    create_first_admin, create_operator, disable_operator, enable_operator, get_bootstrap_status,
    list_operators, login, logout,
};
use crate::request_response::auth::{BootstrapRequest, LoginRequest, OperatorRequest};
use crate::{AuthenticationService, Role};

fn bootstrap(persistence: &mut SqlitePersistence) -> i64 {
    create_first_admin(
        persistence,
        BootstrapRequest {
            login_name: String::from("admin"),
            display_name: String::from("Front Office Admin"),
            password: String::from("correct horse"),
        },
    )
    .unwrap()
    .id
}

fn staff_request(login_name: &str) -> OperatorRequest {
    OperatorRequest {
        login_name: login_name.to_string(),
        display_name: String::from("Desk Clerk"),
        role: String::from("Staff"),
        password: String::from("battery staple"),
    }
}

#[test]
fn test_bootstrap_only_once() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(get_bootstrap_status(&mut persistence).unwrap().needs_bootstrap);

    bootstrap(&mut persistence);
    assert!(!get_bootstrap_status(&mut persistence).unwrap().needs_bootstrap);

    let again = create_first_admin(
        &mut persistence,
        BootstrapRequest {
            login_name: String::from("second"),
            display_name: String::from("Second"),
            password: String::from("pw"),
        },
    );
    match again {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "bootstrap_once"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_login_is_case_insensitive_and_session_validates() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    bootstrap(&mut persistence);

    let response = login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("Admin"),
            password: String::from("correct horse"),
        },
        now(),
    )
    .unwrap();
    assert_eq!(response.operator.login_name, "ADMIN");
    assert_eq!(response.operator.role, "Admin");
    assert_eq!(
        response.operator.last_login_at.as_deref(),
        Some("2026-03-10T12:00:00Z")
    );
    assert!(response.session_token.starts_with("session_"));

    let (actor, operator) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token, now().instant)
            .unwrap();
    assert_eq!(actor.role, Role::Admin);
    assert_eq!(operator.display_name, "Front Office Admin");

    logout(&mut persistence, &response.session_token).unwrap();
    assert!(
        AuthenticationService::validate_session(&mut persistence, &response.session_token, now().instant)
            .is_err()
    );
}

#[test]
fn test_login_rejects_wrong_password() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    bootstrap(&mut persistence);

    let result = login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("admin"),
            password: String::from("wrong"),
        },
        now(),
    );
    match result {
        Err(ApiError::AuthenticationFailed { .. }) => {}
        other => panic!("Expected AuthenticationFailed, got: {other:?}"),
    }
}

#[test]
fn test_staff_cannot_manage_operators() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    bootstrap(&mut persistence);

    let result = create_operator(&mut persistence, staff_request("desk"), &create_test_staff());
    match result {
        Err(ApiError::Unauthorized { required_role, .. }) => assert_eq!(required_role, "Admin"),
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }
    assert!(list_operators(&mut persistence, &create_test_staff()).is_err());
}

#[test]
fn test_create_operator_rejects_unknown_role() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    bootstrap(&mut persistence);

    let mut request = staff_request("desk");
    request.role = String::from("Owner");
    match create_operator(&mut persistence, request, &create_test_admin()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "role"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_disabled_operator_cannot_log_in_until_enabled() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    bootstrap(&mut persistence);
    let staff_id = create_operator(&mut persistence, staff_request("desk"), &create_test_admin())
        .unwrap()
        .id;

    let disabled = disable_operator(&mut persistence, staff_id, &create_test_admin(), now()).unwrap();
    assert!(!disabled.is_active);
    assert!(disabled.disabled_at.is_some());

    let request = LoginRequest {
        login_name: String::from("desk"),
        password: String::from("battery staple"),
    };
    assert!(login(&mut persistence, &request, now()).is_err());

    let enabled = enable_operator(&mut persistence, staff_id, &create_test_admin(), now()).unwrap();
    assert!(enabled.is_active);
    assert!(login(&mut persistence, &request, now()).is_ok());
}

#[test]
fn test_last_active_admin_cannot_be_disabled() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let admin_id = bootstrap(&mut persistence);

    match disable_operator(&mut persistence, admin_id, &create_test_admin(), now()) {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "last_active_admin"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }

    let operators = list_operators(&mut persistence, &create_test_admin()).unwrap();
    assert_eq!(operators.count, 1);
    assert!(operators.results[0].is_active);
}
