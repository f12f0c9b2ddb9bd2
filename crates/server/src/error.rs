// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use innkeep_api::ApiError;
use innkeep_persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Field key for errors that do not belong to one request field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
    /// Per-field messages for validation failures.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
    /// Per-field messages.
    pub fields: BTreeMap<String, String>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            fields: BTreeMap::new(),
        }
    }

    fn with_field(mut self, field: String, message: String) -> Self {
        self.fields.insert(field, message);
        self
    }

    /// Malformed request body or query string.
    #[must_use]
    pub fn malformed(message: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.clone())
            .with_field(NON_FIELD_ERRORS.to_string(), message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            fields: self.fields,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, err.to_string()),
            ApiError::DomainRuleViolation { ref rule, .. } => {
                debug!(rule = %rule, "Domain rule violated");
                let rule: String = rule.clone();
                let message: String = err.to_string();
                Self::new(StatusCode::BAD_REQUEST, message.clone()).with_field(rule, message)
            }
            ApiError::InvalidInput {
                ref field,
                ref message,
            } => {
                let (field, field_message) = (field.clone(), message.clone());
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
                    .with_field(field, field_message)
            }
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ApiError::Conflict { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Internal server error"),
                )
            }
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        Self::from(ApiError::from(err))
    }
}
