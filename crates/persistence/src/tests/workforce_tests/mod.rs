// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job titles, workers and the shift ledger.

use innkeep_domain::{DateRange, Money, ShiftReport};
use time::Duration;
use time::macros::{date, datetime};

use super::{NOW, job_title, worker};
use crate::{ListParams, PersistenceError, ShiftReportFilter, SqlitePersistence, WorkerFilter};

fn worker_with_title(persistence: &mut SqlitePersistence) -> (i64, i64) {
    let job_title_id = persistence.insert_job_title(&job_title("Cleaner", 1000)).unwrap();
    let worker_id = persistence
        .insert_worker(&worker("Asel", 2001, Some(job_title_id)))
        .unwrap();
    (worker_id, job_title_id)
}

#[test]
fn test_job_title_round_trip() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id = persistence.insert_job_title(&job_title("Porter", 1250)).unwrap();

    let stored = persistence.get_job_title(id).unwrap().unwrap();
    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.title, "Porter");
    assert_eq!(stored.pay_per_hour, Money::from_minor(1250));
}

#[test]
fn test_duplicate_job_title_names_field() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence.insert_job_title(&job_title("Porter", 1000)).unwrap();

    let result = persistence.insert_job_title(&job_title("Porter", 2000));
    assert!(matches!(
        result,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "title"
    ));
}

#[test]
fn test_duplicate_telegram_identity_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence.insert_worker(&worker("Asel", 42, None)).unwrap();

    let result = persistence.insert_worker(&worker("Bolat", 42, None));
    assert!(matches!(
        result,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "telegram_id"
    ));
}

#[test]
fn test_job_title_in_use_cannot_be_deleted() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let (_worker_id, job_title_id) = worker_with_title(&mut persistence);

    assert!(matches!(
        persistence.delete_job_title(job_title_id),
        Err(PersistenceError::ReferencedRecord(_))
    ));
    assert!(persistence.get_job_title(job_title_id).unwrap().is_some());
}

#[test]
fn test_delete_unknown_worker_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.delete_worker(7),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_update_worker_keeps_working_flag() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let (worker_id, _) = worker_with_title(&mut persistence);
    persistence.set_worker_working(worker_id, true).unwrap();

    let mut changed = persistence.get_worker(worker_id).unwrap().unwrap();
    changed.name = "Asel K.".to_string();
    changed.is_working = false;
    persistence.update_worker(worker_id, &changed).unwrap();

    let stored = persistence.get_worker(worker_id).unwrap().unwrap();
    assert_eq!(stored.name, "Asel K.");
    assert!(stored.is_working);
}

#[test]
fn test_shift_start_and_finish_are_stored() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let (worker_id, job_title_id) = worker_with_title(&mut persistence);

    let report = ShiftReport::start(worker_id, job_title_id, None, NOW).unwrap();
    let report_id = persistence.insert_shift_report(&report).unwrap();

    let mut open = persistence.find_open_shift(worker_id).unwrap().unwrap();
    assert_eq!(open.id, Some(report_id));
    assert_eq!(open.start, NOW);
    assert!(open.finish.is_none());

    open.finish(NOW + Duration::minutes(90)).unwrap();
    persistence.finish_shift_report(&open).unwrap();

    assert!(persistence.find_open_shift(worker_id).unwrap().is_none());
    let stored = persistence.get_shift_report(report_id).unwrap().unwrap();
    assert_eq!(stored.finish, Some(NOW + Duration::minutes(90)));
}

#[test]
fn test_second_open_shift_is_rejected_by_store() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let (worker_id, job_title_id) = worker_with_title(&mut persistence);

    let first = ShiftReport::start(worker_id, job_title_id, None, NOW).unwrap();
    persistence.insert_shift_report(&first).unwrap();

    let second = ShiftReport::start(worker_id, job_title_id, None, NOW).unwrap();
    assert!(matches!(
        persistence.insert_shift_report(&second),
        Err(PersistenceError::UniqueViolation { .. })
    ));
}

#[test]
fn test_shift_reports_filter_by_state_and_start_date() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let (worker_id, job_title_id) = worker_with_title(&mut persistence);

    let mut finished = ShiftReport::start(
        worker_id,
        job_title_id,
        None,
        datetime!(2026-03-01 08:00 UTC),
    )
    .unwrap();
    finished.finish(datetime!(2026-03-01 16:00 UTC)).unwrap();
    persistence.insert_shift_report(&finished).unwrap();

    let open = ShiftReport::start(worker_id, job_title_id, None, datetime!(2026-03-05 23:30 UTC))
        .unwrap();
    persistence.insert_shift_report(&open).unwrap();

    let params = ListParams::default();
    let only_open = ShiftReportFilter {
        open: Some(true),
        ..ShiftReportFilter::default()
    };
    assert_eq!(persistence.list_shift_reports(&params, only_open).unwrap().count, 1);

    let on_the_fifth = ShiftReportFilter {
        started: DateRange::new(Some(date!(2026 - 03 - 05)), Some(date!(2026 - 03 - 05))),
        ..ShiftReportFilter::default()
    };
    let page = persistence.list_shift_reports(&params, on_the_fifth).unwrap();
    assert_eq!(page.count, 1);
    assert!(page.items[0].finish.is_none());

    let finished_only = ShiftReportFilter {
        open: Some(false),
        ..ShiftReportFilter::default()
    };
    let with_titles = persistence.shift_reports_with_job_titles(finished_only).unwrap();
    assert_eq!(with_titles.len(), 1);
    assert_eq!(with_titles[0].1.id, Some(job_title_id));
}

#[test]
fn test_workers_filter_by_working_flag() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let (worker_id, job_title_id) = worker_with_title(&mut persistence);
    persistence
        .insert_worker(&worker("Bolat", 2002, Some(job_title_id)))
        .unwrap();
    persistence.set_worker_working(worker_id, true).unwrap();

    let working = WorkerFilter {
        is_working: Some(true),
        ..WorkerFilter::default()
    };
    let page = persistence.list_workers(&ListParams::default(), working).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].id, Some(worker_id));

    let by_title = WorkerFilter {
        main_job_title_id: Some(job_title_id),
        ..WorkerFilter::default()
    };
    assert_eq!(persistence.list_workers(&ListParams::default(), by_title).unwrap().count, 2);
}
