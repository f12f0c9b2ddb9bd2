// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Money, format_date, format_timestamp, parse_date, parse_timestamp,
    require_positive, require_text, validate_color, validate_country_code, validate_date_window,
    validate_email, validate_phone,
};
use time::macros::{date, datetime};

#[test]
fn test_require_text_rejects_blank_values() {
    assert!(require_text("name", "Aigerim").is_ok());
    assert_eq!(
        require_text("name", "   "),
        Err(DomainError::EmptyField { field: "name" })
    );
}

#[test]
fn test_require_positive_rejects_zero_and_negative() {
    assert!(require_positive("price", Money::from_minor(1)).is_ok());

    let result: Result<(), DomainError> = require_positive("price", Money::ZERO);
    assert!(matches!(
        result,
        Err(DomainError::NonPositiveAmount { field: "price", .. })
    ));
    assert!(require_positive("amount", Money::from_minor(-100)).is_err());
}

#[test]
fn test_date_window_allows_open_and_equal_bounds() {
    assert!(validate_date_window(None, None).is_ok());
    assert!(validate_date_window(Some(date!(2026 - 01 - 01)), None).is_ok());
    assert!(validate_date_window(Some(date!(2026 - 01 - 01)), Some(date!(2026 - 01 - 01))).is_ok());
}

#[test]
fn test_date_window_rejects_reversed_bounds() {
    let result = validate_date_window(Some(date!(2026 - 02 - 01)), Some(date!(2026 - 01 - 01)));
    let err: DomainError = result.unwrap_err();
    assert_eq!(err.field(), Some("relevant_to"));
}

#[test]
fn test_phone_shapes() {
    assert!(validate_phone("+77011234567").is_ok());
    assert!(validate_phone("123456789").is_ok());
    assert!(validate_phone("+1123456789012345").is_ok());

    assert!(validate_phone("12345678").is_err());
    assert!(validate_phone("+7 701 123 45 67").is_err());
    assert!(validate_phone("+").is_err());
    assert!(validate_phone("9123456789012345").is_err());
}

#[test]
fn test_email_shapes() {
    assert!(validate_email("desk@hotel.kz").is_ok());
    assert!(validate_email("desk@hotel").is_err());
    assert!(validate_email("@hotel.kz").is_err());
    assert!(validate_email("desk at hotel.kz").is_err());
    assert!(validate_email("a@b@c.kz").is_err());
}

#[test]
fn test_color_and_country_code() {
    assert!(validate_color("#808080").is_ok());
    assert!(validate_color("#A0b1C2").is_ok());
    assert!(validate_color("808080").is_err());
    assert!(validate_color("#80808").is_err());

    assert!(validate_country_code("KZ").is_ok());
    assert!(validate_country_code("KAZ").is_ok());
    assert!(validate_country_code("K").is_err());
    assert!(validate_country_code("K1").is_err());
}

#[test]
fn test_dates_parse_and_format() {
    let parsed = parse_date("expiry_date", "2026-07-04").unwrap();
    assert_eq!(parsed, date!(2026 - 07 - 04));
    assert_eq!(format_date(parsed), "2026-07-04");

    match parse_date("expiry_date", "04.07.2026") {
        Err(DomainError::DateParseError { field, value, .. }) => {
            assert_eq!(field, "expiry_date");
            assert_eq!(value, "04.07.2026");
        }
        other => panic!("Expected DateParseError, got: {other:?}"),
    }
}

#[test]
fn test_timestamps_normalize_to_utc_seconds() {
    let parsed = parse_timestamp("check_in", "2026-01-01T17:30:15.750+05:00").unwrap();
    assert_eq!(parsed, datetime!(2026-01-01 12:30:15 UTC));
    assert_eq!(format_timestamp(parsed), "2026-01-01T12:30:15Z");
    assert_eq!(
        format_timestamp(datetime!(2026-01-01 03:05:09.5 +05:00)),
        "2025-12-31T22:05:09Z"
    );
    assert_eq!(format_date(date!(2026 - 01 - 02)), "2026-01-02");
}
