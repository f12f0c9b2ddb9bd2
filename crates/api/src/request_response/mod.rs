// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Money travels as integer minor units, dates as `YYYY-MM-DD`
//! strings and timestamps as RFC 3339 strings; parsing happens in the
//! handlers so every failure can name its field.
//!
//! Create and `PUT` share one full request type per resource. `PATCH`
//! uses a companion type whose fields are all optional; nullable fields
//! are `Option<Option<T>>` so that an explicit `null` clears the value.

pub mod agents;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod documents;
pub mod guests;
pub mod inventory;
pub mod payments;
pub mod workforce;

use innkeep_persistence::{ListParams, Page};
use serde::{Deserialize, Deserializer};

/// Common list query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring to search for.
    pub search: Option<String>,
    /// Field to order by, `-` prefix for descending.
    pub ordering: Option<String>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip.
    pub offset: Option<i64>,
}

impl From<ListQuery> for ListParams {
    fn from(query: ListQuery) -> Self {
        Self {
            search: query.search,
            ordering: query.ordering,
            limit: query.limit,
            offset: query.offset,
        }
    }
}

/// Paginated list response.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListResponse<T> {
    /// Total number of matching records before pagination.
    pub count: i64,
    /// The records on this page.
    pub results: Vec<T>,
}

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            count: page.count,
            results: page.items,
        }
    }
}

impl<T> ListResponse<T> {
    /// Wraps an unpaginated result set.
    #[must_use]
    pub fn all(results: Vec<T>) -> Self {
        Self {
            count: i64::try_from(results.len()).unwrap_or(i64::MAX),
            results,
        }
    }
}

/// Simple confirmation response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    /// Confirmation message.
    pub message: String,
}

/// Query parameters for endpoints that take a day window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DaysQuery {
    /// Number of days to look ahead.
    pub days: Option<i64>,
}

/// Query parameters for statistics over a date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DateRangeQuery {
    /// First day included (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Last day included (`YYYY-MM-DD`).
    pub date_to: Option<String>,
}

/// Deserializes a field that distinguishes "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// an absent field stays `None`, `null` becomes `Some(None)`.
///
/// # Errors
///
/// Returns the deserializer's error for a malformed value.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrites `target` when the patch field is present.
pub fn merge<T>(target: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *target = value;
    }
}

const fn default_true() -> bool {
    true
}
