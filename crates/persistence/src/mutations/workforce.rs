// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job title, worker and shift report mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{JobTitle, ShiftReport, Worker, format_timestamp};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{job_titles, shift_reports, workers};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts a job title and returns its ID.
///
/// # Errors
///
/// Returns an error if the title is taken or the insert fails.
pub fn insert_job_title(conn: &mut SqliteConnection, job_title: &JobTitle) -> Result<i64, PersistenceError> {
    diesel::insert_into(job_titles::table)
        .values((
            job_titles::title.eq(&job_title.title),
            job_titles::pay_per_hour.eq(job_title.pay_per_hour.minor()),
        ))
        .execute(conn)?;
    let job_title_id: i64 = conn.get_last_insert_rowid()?;
    info!(job_title_id, title = %job_title.title, "Created job title");
    Ok(job_title_id)
}

/// Overwrites a job title.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_job_title(
    conn: &mut SqliteConnection,
    job_title_id: i64,
    job_title: &JobTitle,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(job_titles::table.find(job_title_id))
        .set((
            job_titles::title.eq(&job_title.title),
            job_titles::pay_per_hour.eq(job_title.pay_per_hour.minor()),
        ))
        .execute(conn)?;
    ensure_affected(rows, "job title", job_title_id)
}

/// Deletes a job title that no worker or report references.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_job_title(conn: &mut SqliteConnection, job_title_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(job_titles::table.find(job_title_id)).execute(conn)?;
    ensure_affected(rows, "job title", job_title_id)?;
    info!(job_title_id, "Deleted job title");
    Ok(())
}

/// Inserts a worker and returns its ID.
///
/// # Errors
///
/// Returns an error if the chat identity is taken or the insert fails.
pub fn insert_worker(conn: &mut SqliteConnection, worker: &Worker) -> Result<i64, PersistenceError> {
    diesel::insert_into(workers::table)
        .values((
            workers::name.eq(&worker.name),
            workers::main_job_title_id.eq(worker.main_job_title_id),
            workers::telegram_id.eq(worker.telegram_id),
            workers::telegram_username.eq(&worker.telegram_username),
            workers::is_working.eq(i32::from(worker.is_working)),
            workers::created_at.eq(format_timestamp(worker.created_at)),
        ))
        .execute(conn)?;
    let worker_id: i64 = conn.get_last_insert_rowid()?;
    info!(worker_id, name = %worker.name, "Created worker");
    Ok(worker_id)
}

/// Overwrites a worker's editable fields. The working flag is owned by
/// shift start and finish and is left untouched.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_worker(
    conn: &mut SqliteConnection,
    worker_id: i64,
    worker: &Worker,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(workers::table.find(worker_id))
        .set((
            workers::name.eq(&worker.name),
            workers::main_job_title_id.eq(worker.main_job_title_id),
            workers::telegram_id.eq(worker.telegram_id),
            workers::telegram_username.eq(&worker.telegram_username),
        ))
        .execute(conn)?;
    ensure_affected(rows, "worker", worker_id)
}

/// Deletes a worker that nothing references.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_worker(conn: &mut SqliteConnection, worker_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(workers::table.find(worker_id)).execute(conn)?;
    ensure_affected(rows, "worker", worker_id)?;
    info!(worker_id, "Deleted worker");
    Ok(())
}

/// Sets the working flag of a worker.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn set_worker_working(
    conn: &mut SqliteConnection,
    worker_id: i64,
    is_working: bool,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(workers::table.find(worker_id))
        .set(workers::is_working.eq(i32::from(is_working)))
        .execute(conn)?;
    ensure_affected(rows, "worker", worker_id)
}

/// Inserts a new open shift report and returns its ID.
///
/// # Errors
///
/// Returns an error if the worker already has an open shift or the insert
/// fails.
pub fn insert_shift_report(
    conn: &mut SqliteConnection,
    report: &ShiftReport,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(shift_reports::table)
        .values((
            shift_reports::worker_id.eq(report.worker_id),
            shift_reports::job_title_id.eq(report.job_title_id),
            shift_reports::start_at.eq(format_timestamp(report.start)),
            shift_reports::finish_at.eq(report.finish.map(format_timestamp)),
        ))
        .execute(conn)?;
    let report_id: i64 = conn.get_last_insert_rowid()?;
    info!(report_id, worker_id = report.worker_id, "Started shift");
    Ok(report_id)
}

/// Stores the finish time of a report.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn finish_shift_report(
    conn: &mut SqliteConnection,
    report: &ShiftReport,
) -> Result<(), PersistenceError> {
    let report_id: i64 = report.id.unwrap_or_default();
    let rows: usize = diesel::update(shift_reports::table.find(report_id))
        .set(shift_reports::finish_at.eq(report.finish.map(format_timestamp)))
        .execute(conn)?;
    ensure_affected(rows, "shift report", report_id)?;
    info!(report_id, worker_id = report.worker_id, "Finished shift");
    Ok(())
}
