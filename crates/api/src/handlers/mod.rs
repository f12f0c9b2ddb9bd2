// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions, one per operation.
//!
//! Every handler takes the persistence adapter and a [`Now`] built by the
//! caller, so no handler reads the clock. Validation order is:
//!
//! 1. parse the request (dates, choices) into domain values
//! 2. resolve referenced records (unknown → 400 on the referencing field)
//! 3. run domain validation
//! 4. write, inside a transaction when more than one row changes

pub mod agents;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod documents;
pub mod guests;
pub mod inventory;
pub mod payments;
pub mod workforce;

use innkeep_domain::{DateRange, DomainError, HotelClock, normalize_timestamp, parse_optional_date};
use innkeep_persistence::ListParams;
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::ListQuery;

/// The request's notion of "now".
///
/// `instant` is the UTC timestamp used for `created_at`-style fields and
/// lifecycle checks; `today` is the hotel's local calendar date used for
/// expiry, age and relevance. `clock` turns requested calendar days into
/// timestamp bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    pub instant: OffsetDateTime,
    pub today: Date,
    pub clock: HotelClock,
}

impl Now {
    /// Derives today's date in the hotel time zone.
    #[must_use]
    pub fn at(clock: &HotelClock, instant: OffsetDateTime) -> Self {
        let instant: OffsetDateTime = normalize_timestamp(instant);
        Self {
            instant,
            today: clock.today(instant),
            clock: *clock,
        }
    }
}

fn list_params(query: ListQuery) -> Result<ListParams, ApiError> {
    if query.limit.is_some_and(|limit| limit < 0) {
        return Err(ApiError::invalid("limit", "Must not be negative"));
    }
    if query.offset.is_some_and(|offset| offset < 0) {
        return Err(ApiError::invalid("offset", "Must not be negative"));
    }
    Ok(ListParams::from(query))
}

/// Unknown ID in the path.
fn found<T>(record: Option<T>, resource: &str, id: i64) -> Result<T, ApiError> {
    record.ok_or_else(|| ApiError::not_found(resource, id))
}

/// Unknown ID referenced from a request body field.
fn referenced<T>(record: Option<T>, field: &str, id: i64) -> Result<T, ApiError> {
    record.ok_or_else(|| ApiError::invalid(field, format!("Object with ID {id} does not exist")))
}

fn parse_choice<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    value.parse::<T>().map_err(translate_domain_error)
}

fn parse_optional_choice<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    value.map(parse_choice).transpose()
}

/// Parses an inclusive range of hotel calendar days.
fn date_range(
    date_from: Option<&str>,
    date_to: Option<&str>,
    now: Now,
) -> Result<DateRange, ApiError> {
    let from: Option<Date> = parse_optional_date("date_from", date_from)?;
    let to: Option<Date> = parse_optional_date("date_to", date_to)?;
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(ApiError::invalid(
            "date_to",
            format!("{to} is before date_from {from}"),
        ));
    }
    Ok(DateRange::new(from, to).on_clock(now.clock))
}

/// Trims optional text and treats blank input as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn id_of(id: Option<i64>) -> i64 {
    id.unwrap_or_default()
}

/// Deduplicates IDs while keeping their first-seen order.
fn distinct(ids: &[i64]) -> Vec<i64> {
    let mut seen: Vec<i64> = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

