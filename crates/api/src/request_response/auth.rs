// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator accounts and sessions.

/// Body of `POST /auth/login`. The login name is matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    pub login_name: String,
    pub password: String,
}

/// A freshly opened session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionView {
    /// Opaque bearer token.
    pub session_token: String,
    /// RFC 3339 expiry of the token.
    pub expires_at: String,
    pub operator: OperatorView,
}

/// Body of `POST /auth/bootstrap`. The account is always an admin.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BootstrapRequest {
    pub login_name: String,
    pub display_name: String,
    pub password: String,
}

/// Result of `GET /auth/bootstrap-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BootstrapStatusView {
    /// True until the first operator exists.
    pub needs_bootstrap: bool,
}

/// Body of `POST /operators`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperatorRequest {
    pub login_name: String,
    pub display_name: String,
    /// `Admin` or `Staff`.
    pub role: String,
    pub password: String,
}

/// An operator account as returned by the API. Never carries the
/// password hash.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperatorView {
    pub id: i64,
    pub login_name: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}
