// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, bootstrap and operator management handlers.

use innkeep_domain::require_text;
use innkeep_persistence::{OperatorData, SessionData, SqlitePersistence};
use tracing::info;

use super::{Now, found};
use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
use crate::error::ApiError;
use crate::request_response::auth::{
    BootstrapRequest, BootstrapStatusView, LoginRequest, OperatorRequest, OperatorView,
    SessionView,
};
use crate::request_response::ListResponse;

impl From<OperatorData> for OperatorView {
    fn from(operator: OperatorData) -> Self {
        Self {
            id: operator.operator_id,
            is_active: !operator.is_disabled,
            login_name: operator.login_name,
            display_name: operator.display_name,
            role: operator.role,
            created_at: operator.created_at,
            disabled_at: operator.disabled_at,
            last_login_at: operator.last_login_at,
        }
    }
}

fn operator_view(
    persistence: &mut SqlitePersistence,
    operator_id: i64,
) -> Result<OperatorView, ApiError> {
    let operator: OperatorData = found(
        persistence.get_operator_by_id(operator_id)?,
        "Operator",
        operator_id,
    )?;
    Ok(OperatorView::from(operator))
}

/// Reports whether the system still needs its first admin.
///
/// # Errors
///
/// Returns an error if the operator count cannot be read.
pub fn get_bootstrap_status(
    persistence: &mut SqlitePersistence,
) -> Result<BootstrapStatusView, ApiError> {
    let count: i64 = persistence.count_operators()?;
    Ok(BootstrapStatusView {
        needs_bootstrap: count == 0,
    })
}

/// Creates the first admin operator.
///
/// Only allowed while no operator exists.
///
/// # Errors
///
/// Returns an error if operators already exist or the input is invalid.
pub fn create_first_admin(
    persistence: &mut SqlitePersistence,
    request: BootstrapRequest,
) -> Result<OperatorView, ApiError> {
    if persistence.count_operators()? > 0 {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("bootstrap_once"),
            message: String::from("Operators already exist; log in as an admin instead"),
        });
    }
    let operator_id: i64 = insert_operator(
        persistence,
        &request.login_name,
        &request.display_name,
        &request.password,
        Role::Admin,
    )?;
    info!(operator_id, "Bootstrapped first admin operator");
    operator_view(persistence, operator_id)
}

/// Logs in with a login name and password.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for wrong credentials or a disabled
/// operator.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
    now: Now,
) -> Result<SessionView, ApiError> {
    let (session_token, _authenticated_actor, operator): (
        String,
        AuthenticatedActor,
        OperatorData,
    ) = AuthenticationService::login(
        persistence,
        &request.login_name,
        &request.password,
        now.instant,
    )?;

    let session: SessionData = persistence
        .get_session_by_token(&session_token)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?;

    Ok(SessionView {
        session_token,
        expires_at: session.expires_at,
        operator: OperatorView::from(operator),
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Describes the logged-in operator.
#[must_use]
pub fn whoami(operator: &OperatorData) -> OperatorView {
    OperatorView::from(operator.clone())
}

/// Lists all operators. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_operators(
    persistence: &mut SqlitePersistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListResponse<OperatorView>, ApiError> {
    AuthorizationService::require_admin(authenticated_actor, "list_operators")?;
    let results: Vec<OperatorView> = persistence
        .list_operators()?
        .into_iter()
        .map(OperatorView::from)
        .collect();
    Ok(ListResponse {
        count: i64::try_from(results.len()).unwrap_or(i64::MAX),
        results,
    })
}

/// Creates an operator. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the role is unknown,
/// a field is blank, or the login name is taken.
pub fn create_operator(
    persistence: &mut SqlitePersistence,
    request: OperatorRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<OperatorView, ApiError> {
    AuthorizationService::require_admin(authenticated_actor, "create_operator")?;

    let role: Role = Role::parse(&request.role).map_err(|_| {
        ApiError::invalid(
            "role",
            format!("Invalid role: {}. Must be 'Admin' or 'Staff'", request.role),
        )
    })?;

    let operator_id: i64 = insert_operator(
        persistence,
        &request.login_name,
        &request.display_name,
        &request.password,
        role,
    )?;
    info!(
        operator_id,
        created_by = %authenticated_actor.id,
        role = role.as_str(),
        "Created operator"
    );
    operator_view(persistence, operator_id)
}

/// Disables an operator and ends their sessions. Admin only.
///
/// The last active admin cannot be disabled.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the operator is
/// unknown, or it is the last active admin.
pub fn disable_operator(
    persistence: &mut SqlitePersistence,
    operator_id: i64,
    authenticated_actor: &AuthenticatedActor,
    now: Now,
) -> Result<OperatorView, ApiError> {
    AuthorizationService::require_admin(authenticated_actor, "disable_operator")?;
    let target: OperatorData = found(
        persistence.get_operator_by_id(operator_id)?,
        "Operator",
        operator_id,
    )?;

    if target.role == Role::Admin.as_str()
        && !target.is_disabled
        && persistence.count_active_admin_operators()? <= 1
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("last_active_admin"),
            message: String::from("Cannot disable the last active admin operator"),
        });
    }

    persistence.disable_operator(operator_id, now.instant)?;
    info!(operator_id, disabled_by = %authenticated_actor.id, "Disabled operator");
    operator_view(persistence, operator_id)
}

/// Re-enables a disabled operator. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the operator is
/// unknown.
pub fn enable_operator(
    persistence: &mut SqlitePersistence,
    operator_id: i64,
    authenticated_actor: &AuthenticatedActor,
    now: Now,
) -> Result<OperatorView, ApiError> {
    AuthorizationService::require_admin(authenticated_actor, "enable_operator")?;
    persistence.enable_operator(operator_id, now.instant)?;
    info!(operator_id, enabled_by = %authenticated_actor.id, "Enabled operator");
    operator_view(persistence, operator_id)
}

fn insert_operator(
    persistence: &mut SqlitePersistence,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: Role,
) -> Result<i64, ApiError> {
    require_text("login_name", login_name)?;
    require_text("display_name", display_name)?;
    require_text("password", password)?;
    let operator_id: i64 =
        persistence.create_operator(login_name.trim(), display_name.trim(), password, role.as_str())?;
    Ok(operator_id)
}
