// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BillableStay, DomainError, Money, calculate_card_total};
use time::macros::datetime;

fn stay(rate: Option<i64>) -> BillableStay {
    BillableStay {
        nightly_rate: rate.map(Money::from_minor),
        check_in: Some(datetime!(2026-01-01 14:00 UTC)),
        check_out: Some(datetime!(2026-01-04 12:00 UTC)),
    }
}

#[test]
fn test_three_nights_plus_goods_and_service() {
    let total = calculate_card_total(
        &[stay(Some(10_000))],
        &[Money::from_minor(500)],
        &[Money::from_minor(1500)],
    )
    .unwrap();
    assert_eq!(total, Money::from_minor(32_000));
}

#[test]
fn test_nights_use_calendar_dates() {
    // 22 hours apart but across one midnight.
    let s = BillableStay {
        nightly_rate: Some(Money::from_minor(10_000)),
        check_in: Some(datetime!(2026-01-01 14:00 UTC)),
        check_out: Some(datetime!(2026-01-02 12:00 UTC)),
    };
    assert_eq!(s.nights(), Some(1));
    assert_eq!(s.charge().unwrap(), Money::from_minor(10_000));
}

#[test]
fn test_same_day_stay_charges_one_night() {
    let s = BillableStay {
        nightly_rate: Some(Money::from_minor(10_000)),
        check_in: Some(datetime!(2026-01-01 09:00 UTC)),
        check_out: Some(datetime!(2026-01-01 18:00 UTC)),
    };
    assert_eq!(s.nights(), Some(0));
    assert_eq!(s.charge().unwrap(), Money::from_minor(10_000));
}

#[test]
fn test_missing_dates_charge_flat_rate() {
    let s = BillableStay {
        nightly_rate: Some(Money::from_minor(7_500)),
        check_in: None,
        check_out: Some(datetime!(2026-01-04 12:00 UTC)),
    };
    assert_eq!(s.nights(), None);
    assert_eq!(s.charge().unwrap(), Money::from_minor(7_500));
}

#[test]
fn test_room_without_type_contributes_nothing() {
    let total = calculate_card_total(&[stay(None), stay(Some(1_000))], &[], &[]).unwrap();
    assert_eq!(total, Money::from_minor(3_000));
}

#[test]
fn test_empty_card_totals_zero() {
    assert_eq!(calculate_card_total(&[], &[], &[]).unwrap(), Money::ZERO);
}

#[test]
fn test_recalculation_is_idempotent() {
    let stays = [stay(Some(10_000)), stay(Some(12_500))];
    let goods = [Money::from_minor(500), Money::from_minor(250)];
    let first = calculate_card_total(&stays, &goods, &[]).unwrap();
    let second = calculate_card_total(&stays, &goods, &[]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_overflow_is_reported() {
    let result = calculate_card_total(&[stay(Some(i64::MAX))], &[], &[]);
    assert!(matches!(result, Err(DomainError::AmountOverflow { .. })));
}
