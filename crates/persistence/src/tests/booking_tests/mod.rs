// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookings, booking cards and the inputs of the card total.

use innkeep_domain::{BookingStatus, CatalogKind, Money, calculate_card_total};
use time::macros::datetime;

use super::{NOW, booking, booking_card, catalog_item, room, seeded};
use crate::{BookingFilter, ListParams, PersistenceError};

#[test]
fn test_booking_round_trip_and_status() {
    let (mut persistence, fixture) = seeded();
    let booking_id = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();

    let stored = persistence.get_booking(booking_id).unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Booked);
    assert_eq!(stored.check_in, Some(datetime!(2026-01-01 14:00 UTC)));
    assert_eq!(stored.created_by, fixture.worker_id);

    let later = datetime!(2026-03-11 09:00 UTC);
    persistence
        .update_booking_status(booking_id, BookingStatus::CheckedIn, later)
        .unwrap();
    let stored = persistence.get_booking(booking_id).unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::CheckedIn);
    assert_eq!(stored.updated_at, later);
    assert_eq!(stored.created_at, NOW);

    assert!(matches!(
        persistence.update_booking_status(999, BookingStatus::Cancelled, later),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_list_bookings_by_status() {
    let (mut persistence, fixture) = seeded();
    for _ in 0..3 {
        persistence
            .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
            .unwrap();
    }
    persistence
        .update_booking_status(2, BookingStatus::Cancelled, NOW)
        .unwrap();

    let active = BookingFilter {
        statuses: BookingStatus::ACTIVE.to_vec(),
        ..BookingFilter::default()
    };
    let page = persistence.list_bookings(&ListParams::default(), &active).unwrap();
    assert_eq!(page.count, 2);
    assert!(page.items.iter().all(|b| b.status == BookingStatus::Booked));

    let search = ListParams {
        search: Some("sadyk".to_string()),
        ..ListParams::default()
    };
    let page = persistence
        .list_bookings(&search, &BookingFilter::default())
        .unwrap();
    assert_eq!(page.count, 3);
}

#[test]
fn test_card_members_and_total_inputs() {
    let (mut persistence, fixture) = seeded();
    let booking_id = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    let water = persistence
        .insert_catalog_item(&catalog_item(CatalogKind::Goods, "Water", 500))
        .unwrap();
    let laundry = persistence
        .insert_catalog_item(&catalog_item(CatalogKind::Service, "Laundry", 1_500))
        .unwrap();

    let mut card = booking_card(fixture.guest_id, vec![booking_id]);
    card.goods_ids = vec![water];
    card.service_ids = vec![laundry];
    let card_id = persistence.insert_booking_card(&card).unwrap();

    let stored = persistence.get_booking_card(card_id).unwrap().unwrap();
    assert_eq!(stored.booking_ids, vec![booking_id]);
    assert_eq!(stored.goods_ids, vec![water]);
    assert_eq!(stored.service_ids, vec![laundry]);

    let inputs = persistence.card_billing_inputs(card_id).unwrap();
    assert_eq!(inputs.stays.len(), 1);
    assert_eq!(inputs.stays[0].nightly_rate, Some(Money::from_minor(10_000)));
    let total = calculate_card_total(&inputs.stays, &inputs.goods_prices, &inputs.service_prices)
        .unwrap();
    assert_eq!(total, Money::from_minor(32_000));
}

#[test]
fn test_stale_flag_lifecycle() {
    let (mut persistence, fixture) = seeded();
    let booking_id = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    let card_id = persistence
        .insert_booking_card(&booking_card(fixture.guest_id, vec![booking_id]))
        .unwrap();

    assert_eq!(persistence.mark_cards_stale(&[], NOW).unwrap(), 0);
    assert_eq!(persistence.card_ids_using_room(fixture.room_id).unwrap(), vec![card_id]);
    assert_eq!(
        persistence.card_ids_containing_bookings(&[booking_id]).unwrap(),
        vec![card_id]
    );

    assert_eq!(persistence.mark_cards_stale(&[card_id], NOW).unwrap(), 1);
    assert!(persistence.get_booking_card(card_id).unwrap().unwrap().total_is_stale);

    persistence
        .set_card_total(card_id, Money::from_minor(30_000), NOW)
        .unwrap();
    let stored = persistence.get_booking_card(card_id).unwrap().unwrap();
    assert!(!stored.total_is_stale);
    assert_eq!(stored.total_amount, Money::from_minor(30_000));
}

#[test]
fn test_adding_members_skips_existing_links() {
    let (mut persistence, fixture) = seeded();
    let first = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    let other_room = persistence
        .insert_room(&room(102, vec![fixture.room_type_id]))
        .unwrap();
    let second = persistence
        .insert_booking(&booking(fixture.guest_id, other_room, fixture.worker_id))
        .unwrap();
    let card_id = persistence
        .insert_booking_card(&booking_card(fixture.guest_id, vec![first]))
        .unwrap();

    persistence.add_card_bookings(card_id, &[first, second]).unwrap();
    let stored = persistence.get_booking_card(card_id).unwrap().unwrap();
    assert_eq!(stored.booking_ids, vec![first, second]);

    assert!(matches!(
        persistence.add_card_bookings(card_id, &[404]),
        Err(PersistenceError::ReferencedRecord(_))
    ));
}

#[test]
fn test_booking_on_card_cannot_be_deleted() {
    let (mut persistence, fixture) = seeded();
    let booking_id = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    let card_id = persistence
        .insert_booking_card(&booking_card(fixture.guest_id, vec![booking_id]))
        .unwrap();

    assert!(matches!(
        persistence.delete_booking(booking_id),
        Err(PersistenceError::ReferencedRecord(_))
    ));

    persistence.delete_booking_card(card_id).unwrap();
    persistence.delete_booking(booking_id).unwrap();
    assert!(persistence.get_booking(booking_id).unwrap().is_none());
}

#[test]
fn test_update_card_replaces_members_but_not_total() {
    let (mut persistence, fixture) = seeded();
    let first = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    let second = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    let card_id = persistence
        .insert_booking_card(&booking_card(fixture.guest_id, vec![first]))
        .unwrap();
    persistence
        .set_card_total(card_id, Money::from_minor(30_000), NOW)
        .unwrap();

    let mut changed = booking_card(fixture.guest_id, vec![second]);
    changed.total_amount = Money::from_minor(1);
    persistence.update_booking_card(card_id, &changed).unwrap();

    let stored = persistence.get_booking_card(card_id).unwrap().unwrap();
    assert_eq!(stored.booking_ids, vec![second]);
    assert_eq!(stored.total_amount, Money::from_minor(30_000));
}
