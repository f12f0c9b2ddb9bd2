// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every list query follows the same shape: build a boxed, filtered query
//! once for the total count and once more for the ordered, paginated page.
//! Stored text is converted back into domain types here, so callers never
//! see raw rows.

pub mod agents;
pub mod bookings;
pub mod catalog;
pub mod documents;
pub mod guests;
pub mod inventory;
pub mod operators;
pub mod payments;
pub mod workforce;

use diesel::query_dsl::methods::{LimitDsl, OffsetDsl};
use innkeep_domain::{parse_date, parse_timestamp};
use time::{Date, OffsetDateTime};

use crate::data_models::ListParams;
use crate::error::PersistenceError;

/// Splits `-field` into `("field", true)` and `field` into `("field", false)`.
pub(crate) fn split_ordering(ordering: &str) -> (&str, bool) {
    ordering
        .strip_prefix('-')
        .map_or((ordering, false), |field| (field, true))
}

/// Substring pattern for `LIKE`, or `None` when no search was requested.
pub(crate) fn search_pattern(params: &ListParams) -> Option<String> {
    params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| format!("%{term}%"))
}

/// Applies `limit`/`offset` to a boxed query.
pub(crate) fn paginate<Q>(query: Q, params: &ListParams) -> Q
where
    Q: LimitDsl<Output = Q> + OffsetDsl<Output = Q>,
{
    let query: Q = match params.limit {
        Some(limit) => query.limit(limit),
        None => query,
    };
    match params.offset {
        Some(offset) => query.offset(offset),
        None => query,
    }
}

pub(crate) fn stored_date(field: &'static str, value: &str) -> Result<Date, PersistenceError> {
    Ok(parse_date(field, value)?)
}

pub(crate) fn stored_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, PersistenceError> {
    value.map(|v| stored_date(field, v)).transpose()
}

pub(crate) fn stored_timestamp(
    field: &'static str,
    value: &str,
) -> Result<OffsetDateTime, PersistenceError> {
    Ok(parse_timestamp(field, value)?)
}

pub(crate) fn stored_optional_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(|v| stored_timestamp(field, v)).transpose()
}

pub(crate) const fn flag(value: i32) -> bool {
    value != 0
}

#[cfg(test)]
mod tests {
    use super::{search_pattern, split_ordering};
    use crate::data_models::ListParams;

    #[test]
    fn test_split_ordering() {
        assert_eq!(split_ordering("-created_at"), ("created_at", true));
        assert_eq!(split_ordering("name"), ("name", false));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let params = ListParams {
            search: Some(String::from("   ")),
            ..ListParams::default()
        };
        assert_eq!(search_pattern(&params), None);

        let params = ListParams {
            search: Some(String::from(" ivan ")),
            ..ListParams::default()
        };
        assert_eq!(search_pattern(&params).as_deref(), Some("%ivan%"));
    }
}
