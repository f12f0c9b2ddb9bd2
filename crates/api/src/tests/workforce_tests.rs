// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shifts and shift statistics.

use super::helpers::{now, seeded};
use crate::error::ApiError;
use crate::handlers::Now;
use crate::handlers::workforce::{
    create_worker, finish_shift, get_worker, list_active_reports, report_statistics, start_shift,
};
use crate::request_response::workforce::{FinishShiftRequest, StartShiftRequest, WorkerRequest};
use crate::request_response::{DateRangeQuery, ListQuery};
use innkeep_domain::HotelClock;
use time::macros::datetime;

fn finish_at(timestamp: &str) -> FinishShiftRequest {
    FinishShiftRequest {
        finish: Some(timestamp.to_string()),
    }
}

#[test]
fn test_ninety_minute_shift_pays_one_and_a_half_hours() {
    let (mut persistence, fixture) = seeded();

    let started = start_shift(
        &mut persistence,
        fixture.worker_id,
        StartShiftRequest::default(),
        now(),
    )
    .unwrap();
    assert!(started.is_open);
    assert_eq!(started.job_title_id, fixture.job_title_id);
    assert!(get_worker(&mut persistence, fixture.worker_id).unwrap().is_working);

    let finished = finish_shift(
        &mut persistence,
        fixture.worker_id,
        finish_at("2026-03-10T13:30:00Z"),
        now(),
    )
    .unwrap();
    assert!(!finished.is_open);
    assert_eq!(finished.duration_seconds, Some(5400));
    assert!(finished.hours.is_some_and(|h| (h - 1.5).abs() < f64::EPSILON));
    assert_eq!(finished.total_payment, Some(1500));
    assert!(!get_worker(&mut persistence, fixture.worker_id).unwrap().is_working);

    let stats = report_statistics(&mut persistence, &DateRangeQuery::default(), now()).unwrap();
    assert_eq!(stats.overall.shifts, 1);
    assert_eq!(stats.overall.payment, 1500);
    assert_eq!(stats.by_job_title[0].job_title, "Receptionist");
    assert_eq!(stats.by_worker[0].worker_id, fixture.worker_id);
}

#[test]
fn test_statistics_days_follow_hotel_calendar() {
    let (mut persistence, fixture) = seeded();
    let almaty = HotelClock::new("Asia/Almaty").unwrap();
    // 02:00 on 2026-03-05 in Almaty.
    let shift_start = Now::at(&almaty, datetime!(2026-03-04 21:00 UTC));
    let shift_end = Now::at(&almaty, datetime!(2026-03-04 23:30 UTC));

    start_shift(&mut persistence, fixture.worker_id, StartShiftRequest::default(), shift_start)
        .unwrap();
    finish_shift(
        &mut persistence,
        fixture.worker_id,
        FinishShiftRequest::default(),
        shift_end,
    )
    .unwrap();

    let day = |date: &str| DateRangeQuery {
        date_from: Some(date.to_string()),
        date_to: Some(date.to_string()),
    };
    let local_day = report_statistics(&mut persistence, &day("2026-03-05"), shift_end).unwrap();
    assert_eq!(local_day.overall.shifts, 1);
    let utc_day = report_statistics(&mut persistence, &day("2026-03-04"), shift_end).unwrap();
    assert_eq!(utc_day.overall.shifts, 0);
}

#[test]
fn test_second_open_shift_is_refused() {
    let (mut persistence, fixture) = seeded();
    start_shift(&mut persistence, fixture.worker_id, StartShiftRequest::default(), now()).unwrap();

    match start_shift(&mut persistence, fixture.worker_id, StartShiftRequest::default(), now()) {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "one_open_shift_per_worker");
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
    let active = list_active_reports(&mut persistence, ListQuery::default(), now()).unwrap();
    assert_eq!(active.count, 1);
}

#[test]
fn test_finish_without_open_shift_is_refused() {
    let (mut persistence, fixture) = seeded();
    match finish_shift(
        &mut persistence,
        fixture.worker_id,
        FinishShiftRequest::default(),
        now(),
    ) {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "open_shift_required"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_finish_before_start_leaves_shift_open() {
    let (mut persistence, fixture) = seeded();
    start_shift(&mut persistence, fixture.worker_id, StartShiftRequest::default(), now()).unwrap();

    match finish_shift(
        &mut persistence,
        fixture.worker_id,
        finish_at("2026-03-10T11:00:00Z"),
        now(),
    ) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "finish"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
    let active = list_active_reports(&mut persistence, ListQuery::default(), now()).unwrap();
    assert_eq!(active.count, 1);
}

#[test]
fn test_worker_without_job_title_needs_one_to_start() {
    let (mut persistence, _fixture) = seeded();
    let worker_id = create_worker(
        &mut persistence,
        WorkerRequest {
            name: String::from("Yerlan"),
            main_job_title_id: None,
            telegram_id: 2002,
            telegram_username: None,
        },
        now(),
    )
    .unwrap()
    .id;

    match start_shift(&mut persistence, worker_id, StartShiftRequest::default(), now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "job_title_id"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_unknown_job_title_reference_is_invalid_input() {
    let (mut persistence, _fixture) = seeded();
    let result = create_worker(
        &mut persistence,
        WorkerRequest {
            name: String::from("Yerlan"),
            main_job_title_id: Some(999),
            telegram_id: 2002,
            telegram_username: None,
        },
        now(),
    );
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "main_job_title_id"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}
