// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payments per channel and payment orders.

use innkeep_domain::PaymentChannel;
use innkeep_persistence::SqlitePersistence;

use super::helpers::{card_with_extras, now, seeded};
use crate::error::ApiError;
use crate::handlers::payments::{
    attach_payment, create_payment, create_payment_order, get_payment, get_payment_order,
    patch_payment, payment_statistics,
};
use crate::request_response::payments::{
    AttachPaymentRequest, CreatePaymentOrderRequest, PaymentFilterQuery, PaymentPatch,
    PaymentRequest,
};

fn payment_request(booking_card_id: i64, amount: i64) -> PaymentRequest {
    PaymentRequest {
        amount,
        agent_id: None,
        booking_card_id,
        is_chargeback: false,
        issued_at: None,
        cheque_id: None,
        received_by: None,
        reference_number: None,
        bank_name: None,
    }
}

fn open_order(persistence: &mut SqlitePersistence, card_id: i64) -> i64 {
    create_payment_order(
        persistence,
        CreatePaymentOrderRequest {
            booking_card_id: card_id,
            notes: None,
        },
        now(),
    )
    .unwrap()
    .id
}

#[test]
fn test_order_totals_net_chargebacks_per_channel() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);

    let card = create_payment(
        &mut persistence,
        PaymentChannel::Card,
        payment_request(card_id, 20_000),
        now(),
    )
    .unwrap();
    let cash = create_payment(
        &mut persistence,
        PaymentChannel::Cash,
        PaymentRequest {
            received_by: Some(fixture.worker_id),
            ..payment_request(card_id, 5_000)
        },
        now(),
    )
    .unwrap();
    let refund = create_payment(
        &mut persistence,
        PaymentChannel::Bank,
        PaymentRequest {
            is_chargeback: true,
            bank_name: Some(String::from("Halyk")),
            ..payment_request(card_id, 3_000)
        },
        now(),
    )
    .unwrap();
    assert_eq!(card.issued_at, "2026-03-10T12:00:00Z");

    let order_id = open_order(&mut persistence, card_id);
    for (channel, payment_id) in [
        (PaymentChannel::Card, card.id),
        (PaymentChannel::Cash, cash.id),
        (PaymentChannel::Bank, refund.id),
    ] {
        attach_payment(
            &mut persistence,
            order_id,
            channel,
            AttachPaymentRequest { payment_id },
        )
        .unwrap();
    }

    let order = get_payment_order(&mut persistence, order_id).unwrap();
    assert_eq!(order.payment_ids.len(), 3);
    assert_eq!(order.card_total, 20_000);
    assert_eq!(order.cash_total, 5_000);
    assert_eq!(order.bank_total, -3_000);
    assert_eq!(order.total, 22_000);
}

#[test]
fn test_attach_through_wrong_channel_is_refused() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);
    let cash = create_payment(
        &mut persistence,
        PaymentChannel::Cash,
        payment_request(card_id, 5_000),
        now(),
    )
    .unwrap();
    let order_id = open_order(&mut persistence, card_id);

    match attach_payment(
        &mut persistence,
        order_id,
        PaymentChannel::Card,
        AttachPaymentRequest { payment_id: cash.id },
    ) {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "payment_channel"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
    assert!(get_payment_order(&mut persistence, order_id).unwrap().payment_ids.is_empty());
}

#[test]
fn test_attach_payment_of_another_card_is_refused() {
    let (mut persistence, fixture) = seeded();
    let first_card = card_with_extras(&mut persistence, &fixture);
    let second_card = card_with_extras(&mut persistence, &fixture);
    let payment = create_payment(
        &mut persistence,
        PaymentChannel::Card,
        payment_request(second_card, 1_000),
        now(),
    )
    .unwrap();
    let order_id = open_order(&mut persistence, first_card);

    match attach_payment(
        &mut persistence,
        order_id,
        PaymentChannel::Card,
        AttachPaymentRequest {
            payment_id: payment.id,
        },
    ) {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "payment_booking_card");
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_one_order_per_card() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);
    open_order(&mut persistence, card_id);

    match create_payment_order(
        &mut persistence,
        CreatePaymentOrderRequest {
            booking_card_id: card_id,
            notes: None,
        },
        now(),
    ) {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "one_payment_order_per_card");
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_payment_validation() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);

    let future = PaymentRequest {
        issued_at: Some(String::from("2026-03-11T00:00:00Z")),
        ..payment_request(card_id, 1_000)
    };
    match create_payment(&mut persistence, PaymentChannel::Card, future, now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "issued_at"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }

    match create_payment(
        &mut persistence,
        PaymentChannel::Card,
        payment_request(card_id, 0),
        now(),
    ) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "amount"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }

    match create_payment(
        &mut persistence,
        PaymentChannel::Bank,
        payment_request(card_id, 1_000),
        now(),
    ) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "bank_name"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_payment_is_scoped_to_its_channel() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);
    let card = create_payment(
        &mut persistence,
        PaymentChannel::Card,
        payment_request(card_id, 1_000),
        now(),
    )
    .unwrap();

    match get_payment(&mut persistence, PaymentChannel::Cash, card.id) {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "CashPayment");
        }
        other => panic!("Expected ResourceNotFound, got: {other:?}"),
    }
}

#[test]
fn test_attached_payment_cannot_move_to_another_card() {
    let (mut persistence, fixture) = seeded();
    let first_card = card_with_extras(&mut persistence, &fixture);
    let second_card = card_with_extras(&mut persistence, &fixture);
    let payment = create_payment(
        &mut persistence,
        PaymentChannel::Card,
        payment_request(first_card, 1_000),
        now(),
    )
    .unwrap();
    let order_id = open_order(&mut persistence, first_card);
    attach_payment(
        &mut persistence,
        order_id,
        PaymentChannel::Card,
        AttachPaymentRequest {
            payment_id: payment.id,
        },
    )
    .unwrap();

    let result = patch_payment(
        &mut persistence,
        PaymentChannel::Card,
        payment.id,
        PaymentPatch {
            booking_card_id: Some(second_card),
            ..PaymentPatch::default()
        },
        now(),
    );
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "payment_booking_card");
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_cash_statistics_group_by_worker() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);
    for (amount, is_chargeback) in [(5_000, false), (2_000, false), (1_000, true)] {
        create_payment(
            &mut persistence,
            PaymentChannel::Cash,
            PaymentRequest {
                received_by: Some(fixture.worker_id),
                is_chargeback,
                ..payment_request(card_id, amount)
            },
            now(),
        )
        .unwrap();
    }

    let stats = payment_statistics(
        &mut persistence,
        PaymentChannel::Cash,
        PaymentFilterQuery::default(),
        now(),
    )
    .unwrap();
    assert_eq!(stats.payments, 2);
    assert_eq!(stats.chargebacks, 1);
    assert_eq!(stats.payment_amount, 7_000);
    assert_eq!(stats.chargeback_amount, 1_000);
    assert_eq!(stats.net, 6_000);
    assert_eq!(stats.by_worker.len(), 1);
    assert_eq!(stats.by_worker[0].totals.net, 6_000);
}
