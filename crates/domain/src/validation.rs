// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared field validators and date codecs.
//!
//! Every entity validates its prices, windows and contact fields through
//! these functions so the rules and their error messages stay identical
//! across the registry.

use crate::error::DomainError;
use crate::money::Money;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Validates that a required text field is not blank.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the value is empty or whitespace only.
pub fn require_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// Validates that an amount is strictly positive.
///
/// # Errors
///
/// Returns `DomainError::NonPositiveAmount` if the amount is zero or negative.
pub const fn require_positive(field: &'static str, amount: Money) -> Result<(), DomainError> {
    if !amount.is_positive() {
        return Err(DomainError::NonPositiveAmount { field, amount });
    }
    Ok(())
}

/// Validates that a window's start is not after its end.
///
/// Open-ended windows (either bound absent) are always valid.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateWindow` if `from > to`.
pub fn validate_date_window(from: Option<Date>, to: Option<Date>) -> Result<(), DomainError> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(DomainError::InvalidDateWindow { from, to });
    }
    Ok(())
}

/// Validates a phone number: 9 to 15 digits, optionally prefixed by `+`
/// and an extra leading `1`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the shape does not match.
pub fn validate_phone(value: &str) -> Result<(), DomainError> {
    let digits: &str = value.strip_prefix('+').unwrap_or(value);
    let all_digits: bool = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    let length_ok: bool = match digits.len() {
        9..=15 => true,
        16 => digits.starts_with('1'),
        _ => false,
    };

    if all_digits && length_ok {
        Ok(())
    } else {
        Err(DomainError::InvalidPhone(value.to_string()))
    }
}

/// Validates the general shape of an email address.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address has no local part,
/// no dotted domain, or contains whitespace.
pub fn validate_email(value: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(value.to_string());

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels_ok: bool = domain.split('.').count() >= 2 && domain.split('.').all(|l| !l.is_empty());
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

/// Validates a `#RRGGBB` color.
///
/// # Errors
///
/// Returns `DomainError::InvalidColor` on any other shape.
pub fn validate_color(value: &str) -> Result<(), DomainError> {
    match value.strip_prefix('#') {
        Some(hex) if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(()),
        _ => Err(DomainError::InvalidColor(value.to_string())),
    }
}

/// Validates a 2 or 3 letter country code.
///
/// # Errors
///
/// Returns `DomainError::InvalidCountryCode` on any other shape.
pub fn validate_country_code(value: &str) -> Result<(), DomainError> {
    if (2..=3).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(DomainError::InvalidCountryCode(value.to_string()))
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` naming `field` if parsing fails.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        field,
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses an RFC 3339 timestamp and normalizes it to whole seconds in UTC.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` naming `field` if parsing fails.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map(normalize_timestamp)
        .map_err(|e| DomainError::DateParseError {
            field,
            value: value.to_string(),
            error: e.to_string(),
        })
}

/// Converts a timestamp to UTC and drops sub-second precision.
///
/// Stored timestamps share one fixed-width shape so that they order
/// lexicographically.
#[must_use]
pub fn normalize_timestamp(ts: OffsetDateTime) -> OffsetDateTime {
    let utc: OffsetDateTime = ts.to_offset(UtcOffset::UTC);
    utc - Duration::nanoseconds(i64::from(utc.nanosecond()))
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let utc: OffsetDateTime = normalize_timestamp(ts);
    utc.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| utc.to_string())
}

/// Parses an optional date, treating `None` as absent.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if a present value fails to parse.
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, DomainError> {
    value.map(|v| parse_date(field, v)).transpose()
}

/// Parses an optional timestamp, treating `None` as absent.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if a present value fails to parse.
pub fn parse_optional_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, DomainError> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}
