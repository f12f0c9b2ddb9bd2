// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer session extraction.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use innkeep_api::{AuthenticatedActor, AuthenticationService};
use innkeep_persistence::OperatorData;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::HttpError;

/// The operator behind the request's session token.
///
/// Rejects with 401 when the `Authorization: Bearer <token>` header is
/// missing or malformed, when the token is unknown or expired, and when
/// the operator has been disabled.
pub struct SessionOperator(pub AuthenticatedActor, pub OperatorData);

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(&parts.headers)?.to_string();

        let mut persistence = state.persistence.lock().await;
        let (actor, operator) = AuthenticationService::validate_session(
            &mut persistence,
            &token,
            OffsetDateTime::now_utc(),
        )
        .map_err(|e| {
            warn!(error = %e, "Session validation failed");
            SessionError::InvalidSession(e.to_string())
        })?;

        debug!(
            login_name = %operator.login_name,
            role = ?actor.role,
            "Session validated"
        );

        Ok(Self(actor, operator))
    }
}

/// Reads the token out of `Authorization: Bearer <token>`.
///
/// # Errors
///
/// Returns a `SessionError` when the header is absent or not a bearer
/// credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, SessionError> {
    let header: &str = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            warn!("Authorization header is not a bearer token");
            SessionError::InvalidAuthorizationHeader
        })
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
            fields: BTreeMap::new(),
        }
        .into_response()
    }
}
