// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Creates a new operator and returns its ID.
///
/// The login name is stored uppercase and the password as a bcrypt hash.
///
/// # Errors
///
/// Returns an error if hashing fails or the login name is taken.
pub fn create_operator(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.to_uppercase();

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(operators::table)
        .values((
            operators::login_name.eq(&normalized_login),
            operators::display_name.eq(display_name),
            operators::password_hash.eq(&password_hash),
            operators::role.eq(role),
        ))
        .execute(conn)?;

    let operator_id: i64 = conn.get_last_insert_rowid()?;
    info!(operator_id, login_name = %normalized_login, role, "Created operator");
    Ok(operator_id)
}

/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    operator_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::update(operators::table.find(operator_id))
        .set(operators::last_login_at.eq(Some(now)))
        .execute(conn)?;
    Ok(())
}

/// Disables or re-enables an operator. Disabling also ends every session
/// the operator holds.
///
/// # Errors
///
/// Returns `NotFound` for an unknown operator, or a database error.
pub fn set_operator_disabled(
    conn: &mut SqliteConnection,
    operator_id: i64,
    disabled: bool,
    now: &str,
) -> Result<(), PersistenceError> {
    let disabled_at: Option<&str> = disabled.then_some(now);
    let rows: usize = diesel::update(operators::table.find(operator_id))
        .set((
            operators::is_disabled.eq(i32::from(disabled)),
            operators::disabled_at.eq(disabled_at),
        ))
        .execute(conn)?;
    ensure_affected(rows, "operator", operator_id)?;

    if disabled {
        delete_sessions_for_operator(conn, operator_id)?;
    }
    info!(operator_id, disabled, "Changed operator status");
    Ok(())
}

/// Stores a new session and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    operator_id: i64,
    now: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::operator_id.eq(operator_id),
            sessions::created_at.eq(now),
            sessions::last_activity_at.eq(now),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;
    debug!(session_id, operator_id, expires_at, "Created session");
    Ok(session_id)
}

/// Records activity on a session.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.find(session_id))
        .set(sessions::last_activity_at.eq(now))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token. Unknown tokens are ignored.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &mut SqliteConnection, session_token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}

/// Deletes every session that expired before `now`.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection, now: &str) -> Result<usize, PersistenceError> {
    let rows: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(now))).execute(conn)?;
    if rows > 0 {
        info!(rows, "Deleted expired sessions");
    }
    Ok(rows)
}

/// Deletes every session of one operator.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_sessions_for_operator(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::operator_id.eq(operator_id)))
            .execute(conn)?,
    )
}
