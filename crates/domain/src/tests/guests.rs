// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Gender, Guest};
use std::str::FromStr;
use time::macros::{date, datetime};

fn guest() -> Guest {
    Guest {
        id: Some(1),
        first_name: String::from("Aliya"),
        last_name: String::from("Nurova"),
        middle_name: None,
        nationality_id: 1,
        phone: Some(String::from("+77011234567")),
        email: Some(String::from("aliya@example.kz")),
        date_of_birth: Some(date!(1990 - 06 - 15)),
        gender: Some(Gender::Female),
        blacklisted: false,
        blacklist_reason: None,
        notes: None,
        created_at: datetime!(2026-01-01 00:00 UTC),
        updated_at: datetime!(2026-01-01 00:00 UTC),
    }
}

#[test]
fn test_age_adjusts_for_birthday() {
    let g = guest();
    assert_eq!(g.age(date!(2026 - 06 - 14)), Some(35));
    assert_eq!(g.age(date!(2026 - 06 - 15)), Some(36));
    assert_eq!(Guest { date_of_birth: None, ..g }.age(date!(2026 - 06 - 15)), None);
}

#[test]
fn test_can_book_when_not_blacklisted() {
    let eligibility = guest().can_book();
    assert!(eligibility.allowed);
    assert_eq!(eligibility.reason, "OK");
    assert!(guest().ensure_can_book().is_ok());
}

#[test]
fn test_blacklisted_guest_cannot_book() {
    let mut g = guest();
    g.blacklist("Damaged room 204").unwrap();

    let eligibility = g.can_book();
    assert!(!eligibility.allowed);
    assert_eq!(eligibility.reason, "Damaged room 204");

    let err = g.ensure_can_book().unwrap_err();
    assert_eq!(err.to_string(), "Guest cannot book: Damaged room 204");
    assert_eq!(err.field(), Some("guest_id"));
}

#[test]
fn test_blacklist_without_reason_uses_default_message() {
    let g = Guest {
        blacklisted: true,
        blacklist_reason: None,
        ..guest()
    };
    assert_eq!(g.can_book().reason, "guest is blacklisted");
}

#[test]
fn test_blacklist_requires_reason() {
    let mut g = guest();
    assert_eq!(g.blacklist("  "), Err(DomainError::BlacklistReasonRequired));
    assert!(!g.blacklisted);

    g.blacklisted = true;
    assert_eq!(g.validate(), Err(DomainError::BlacklistReasonRequired));
}

#[test]
fn test_clearing_blacklist_clears_reason() {
    let mut g = guest();
    g.blacklist("Unpaid invoice").unwrap();
    g.clear_blacklist();
    assert!(!g.blacklisted);
    assert_eq!(g.blacklist_reason, None);
}

#[test]
fn test_contact_validation() {
    let bad_phone = Guest {
        phone: Some(String::from("12-34")),
        ..guest()
    };
    assert_eq!(bad_phone.validate().unwrap_err().field(), Some("phone"));

    let bad_email = Guest {
        email: Some(String::from("aliya.example.kz")),
        ..guest()
    };
    assert_eq!(bad_email.validate().unwrap_err().field(), Some("email"));
}

#[test]
fn test_gender_codes() {
    assert_eq!(Gender::from_str("F"), Ok(Gender::Female));
    assert_eq!(Gender::Other.as_str(), "O");
    assert!(Gender::from_str("X").is_err());
}
