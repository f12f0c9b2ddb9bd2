// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest records and the blacklist gate.

use super::helpers::{booking_request, guest_request, now, seeded};
use crate::error::ApiError;
use crate::handlers::bookings::create_booking;
use crate::handlers::guests::{
    blacklist_guest, create_guest, get_guest, guest_eligibility, list_blacklisted_guests,
    patch_guest, unblacklist_guest,
};
use crate::request_response::ListQuery;
use crate::request_response::guests::{BlacklistRequest, GuestPatch, GuestRequest};

#[test]
fn test_blacklisting_requires_a_reason() {
    let (mut persistence, fixture) = seeded();

    let request = GuestRequest {
        blacklisted: true,
        blacklist_reason: Some(String::from("   ")),
        ..guest_request(fixture.nationality_id)
    };
    match create_guest(&mut persistence, request, now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "blacklist_reason"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }

    match blacklist_guest(
        &mut persistence,
        fixture.guest_id,
        &BlacklistRequest::default(),
        now(),
    ) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "blacklist_reason"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
    assert!(!get_guest(&mut persistence, fixture.guest_id, now()).unwrap().blacklisted);
}

#[test]
fn test_blacklisted_guest_cannot_book_until_cleared() {
    let (mut persistence, fixture) = seeded();
    let reason = BlacklistRequest {
        reason: String::from("Damaged the minibar"),
    };
    let guest = blacklist_guest(&mut persistence, fixture.guest_id, &reason, now()).unwrap();
    assert!(guest.blacklisted);

    let eligibility = guest_eligibility(&mut persistence, fixture.guest_id).unwrap();
    assert!(!eligibility.can_book);
    assert_eq!(eligibility.reason, "Damaged the minibar");

    let blacklisted = list_blacklisted_guests(&mut persistence, ListQuery::default(), now()).unwrap();
    assert_eq!(blacklisted.count, 1);

    match create_booking(&mut persistence, booking_request(&fixture), now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "guest_id"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }

    let cleared = unblacklist_guest(&mut persistence, fixture.guest_id, now()).unwrap();
    assert!(!cleared.blacklisted);
    assert_eq!(cleared.blacklist_reason, None);
    assert!(create_booking(&mut persistence, booking_request(&fixture), now()).is_ok());
}

#[test]
fn test_phone_is_unique_across_guests() {
    let (mut persistence, fixture) = seeded();
    let first = GuestRequest {
        phone: Some(String::from("+77011234567")),
        ..guest_request(fixture.nationality_id)
    };
    create_guest(&mut persistence, first.clone(), now()).unwrap();

    match create_guest(&mut persistence, first, now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "phone"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_phone_and_email_shapes_are_checked() {
    let (mut persistence, fixture) = seeded();
    let bad_phone = GuestRequest {
        phone: Some(String::from("12-34")),
        ..guest_request(fixture.nationality_id)
    };
    match create_guest(&mut persistence, bad_phone, now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "phone"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }

    let bad_email = GuestRequest {
        email: Some(String::from("not-an-address")),
        ..guest_request(fixture.nationality_id)
    };
    match create_guest(&mut persistence, bad_email, now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "email"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_patch_keeps_untouched_fields() {
    let (mut persistence, fixture) = seeded();
    let patched = patch_guest(
        &mut persistence,
        fixture.guest_id,
        GuestPatch {
            date_of_birth: Some(Some(String::from("1990-03-11"))),
            ..GuestPatch::default()
        },
        now(),
    )
    .unwrap();
    assert_eq!(patched.first_name, "Aigerim");
    assert_eq!(patched.full_name, "Sadykova Aigerim");
    assert_eq!(patched.age, Some(35));
}

#[test]
fn test_patch_null_clears_optional_field() {
    let (mut persistence, fixture) = seeded();
    let with_phone: GuestPatch =
        serde_json::from_str(r#"{"phone": "+77011234567", "notes": "VIP"}"#).unwrap();
    let guest = patch_guest(&mut persistence, fixture.guest_id, with_phone, now()).unwrap();
    assert_eq!(guest.phone.as_deref(), Some("+77011234567"));

    let clear: GuestPatch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
    assert_eq!(clear.phone, Some(None));
    assert_eq!(clear.notes, None);
    let guest = patch_guest(&mut persistence, fixture.guest_id, clear, now()).unwrap();
    assert_eq!(guest.phone, None);
    assert_eq!(guest.notes.as_deref(), Some("VIP"));
}
