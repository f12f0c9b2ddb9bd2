// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{DateRange, Money, Payment, PaymentChannel, PaymentDetails, PaymentOrder};
use time::OffsetDateTime;
use time::macros::{date, datetime};

use super::{Fixture, NOW, booking, booking_card, seeded};
use crate::{ListParams, PaymentFilter, PersistenceError, SqlitePersistence};

fn payment(booking_card_id: i64, amount: i64, issued_at: OffsetDateTime, details: PaymentDetails) -> Payment {
    Payment {
        id: None,
        amount: Money::from_minor(amount),
        agent_id: None,
        booking_card_id,
        is_chargeback: false,
        issued_at,
        details,
    }
}

fn card_on_file(persistence: &mut SqlitePersistence, fixture: &Fixture) -> i64 {
    let booking_id = persistence
        .insert_booking(&booking(fixture.guest_id, fixture.room_id, fixture.worker_id))
        .unwrap();
    persistence
        .insert_booking_card(&booking_card(fixture.guest_id, vec![booking_id]))
        .unwrap()
}

fn bank(name: &str) -> PaymentDetails {
    PaymentDetails::Bank {
        reference_number: Some("REF-1".to_string()),
        bank_name: name.to_string(),
    }
}

#[test]
fn test_channel_details_round_trip() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);

    let cash = PaymentDetails::Cash {
        cheque_id: Some("CH-77".to_string()),
        received_by: Some(fixture.worker_id),
    };
    let cash_id = persistence
        .insert_payment(&payment(card_id, 15_000, NOW, cash.clone()))
        .unwrap();
    let bank_id = persistence
        .insert_payment(&payment(card_id, 5_000, NOW, bank("Kaspi")))
        .unwrap();

    let stored = persistence
        .get_payment(PaymentChannel::Cash, cash_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.details, cash);
    assert_eq!(stored.amount, Money::from_minor(15_000));

    let stored = persistence.get_any_payment(bank_id).unwrap().unwrap();
    assert_eq!(stored.channel(), PaymentChannel::Bank);
    assert_eq!(stored.details, bank("Kaspi"));

    assert!(
        persistence
            .get_payment(PaymentChannel::Card, cash_id)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_list_payments_by_channel_and_bank() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);

    persistence
        .insert_payment(&payment(card_id, 1_000, NOW, PaymentDetails::Card { cheque_id: None }))
        .unwrap();
    persistence
        .insert_payment(&payment(card_id, 2_000, NOW, bank("Kaspi")))
        .unwrap();
    persistence
        .insert_payment(&payment(card_id, 3_000, NOW, bank("Halyk")))
        .unwrap();

    let page = persistence
        .list_payments(&ListParams::default(), &PaymentFilter::channel(PaymentChannel::Bank))
        .unwrap();
    assert_eq!(page.count, 2);

    let mut kaspi = PaymentFilter::channel(PaymentChannel::Bank);
    kaspi.bank_name = Some("Kaspi".to_string());
    let page = persistence.list_payments(&ListParams::default(), &kaspi).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].amount, Money::from_minor(2_000));
}

#[test]
fn test_issued_range_covers_whole_days() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);
    let details = PaymentDetails::Card { cheque_id: None };

    for issued_at in [
        datetime!(2026-03-01 08:00 UTC),
        datetime!(2026-03-02 23:59 UTC),
        datetime!(2026-03-03 00:00 UTC),
    ] {
        persistence
            .insert_payment(&payment(card_id, 1_000, issued_at, details.clone()))
            .unwrap();
    }

    let mut filter = PaymentFilter::channel(PaymentChannel::Card);
    filter.issued = DateRange::new(Some(date!(2026 - 03 - 01)), Some(date!(2026 - 03 - 02)));
    assert_eq!(persistence.all_payments(&filter).unwrap().len(), 2);

    filter.issued = DateRange::new(Some(date!(2026 - 03 - 03)), None);
    assert_eq!(persistence.all_payments(&filter).unwrap().len(), 1);
}

#[test]
fn test_wrong_channel_cannot_change_payment() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);
    let payment_id = persistence
        .insert_payment(&payment(card_id, 1_000, NOW, bank("Kaspi")))
        .unwrap();

    assert!(matches!(
        persistence.delete_payment(PaymentChannel::Cash, payment_id),
        Err(PersistenceError::NotFound(_))
    ));
    persistence.delete_payment(PaymentChannel::Bank, payment_id).unwrap();
}

#[test]
fn test_one_payment_order_per_card() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);

    let order = PaymentOrder::open(card_id, None, Some("deposit".to_string()), NOW).unwrap();
    let order_id = persistence.insert_payment_order(&order).unwrap();
    assert_eq!(
        persistence.get_payment_order_for_card(card_id).unwrap().unwrap().id,
        Some(order_id)
    );

    let duplicate = persistence.insert_payment_order(&order);
    assert!(matches!(
        duplicate,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "booking_card_id"
    ));
}

#[test]
fn test_attached_payments_outlive_their_order() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);
    let payment_id = persistence
        .insert_payment(&payment(card_id, 1_000, NOW, PaymentDetails::Card { cheque_id: None }))
        .unwrap();
    let order_id = persistence
        .insert_payment_order(&PaymentOrder::open(card_id, None, None, NOW).unwrap())
        .unwrap();

    persistence.attach_payment(order_id, payment_id).unwrap();
    persistence.attach_payment(order_id, payment_id).unwrap();
    let attached = persistence.payments_for_order(order_id).unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].id, Some(payment_id));

    assert!(matches!(
        persistence.delete_payment(PaymentChannel::Card, payment_id),
        Err(PersistenceError::ReferencedRecord(_))
    ));

    persistence.delete_payment_order(order_id).unwrap();
    assert!(persistence.get_any_payment(payment_id).unwrap().is_some());
}

#[test]
fn test_payment_order_notes_update() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_on_file(&mut persistence, &fixture);
    let order_id = persistence
        .insert_payment_order(&PaymentOrder::open(card_id, None, None, NOW).unwrap())
        .unwrap();

    persistence
        .update_payment_order_notes(order_id, Some("paid in two parts"))
        .unwrap();
    let stored = persistence.get_payment_order(order_id).unwrap().unwrap();
    assert_eq!(stored.notes.as_deref(), Some("paid in two parts"));
    assert_eq!(stored.created_at, NOW);
}
