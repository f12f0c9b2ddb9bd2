// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job title, worker and shift report queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{JobTitle, Money, ShiftReport, Worker};
use tracing::debug;

use crate::data_models::{ListParams, Page, ShiftReportFilter, WorkerFilter};
use crate::diesel_schema::{job_titles, shift_reports, workers};
use crate::error::PersistenceError;
use crate::queries::{
    flag, paginate, search_pattern, stored_optional_timestamp, stored_timestamp,
};

#[derive(Queryable, Selectable)]
#[diesel(table_name = job_titles)]
pub(crate) struct JobTitleRow {
    job_title_id: i64,
    title: String,
    pay_per_hour: i64,
}

impl From<JobTitleRow> for JobTitle {
    fn from(row: JobTitleRow) -> Self {
        Self {
            id: Some(row.job_title_id),
            title: row.title,
            pay_per_hour: Money::from_minor(row.pay_per_hour),
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = workers)]
struct WorkerRow {
    worker_id: i64,
    name: String,
    main_job_title_id: Option<i64>,
    telegram_id: i64,
    telegram_username: Option<String>,
    is_working: i32,
    created_at: String,
}

impl TryFrom<WorkerRow> for Worker {
    type Error = PersistenceError;

    fn try_from(row: WorkerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.worker_id),
            name: row.name,
            main_job_title_id: row.main_job_title_id,
            telegram_id: row.telegram_id,
            telegram_username: row.telegram_username,
            is_working: flag(row.is_working),
            created_at: stored_timestamp("created_at", &row.created_at)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_reports)]
pub(crate) struct ShiftReportRow {
    report_id: i64,
    worker_id: i64,
    job_title_id: i64,
    start_at: String,
    finish_at: Option<String>,
}

impl TryFrom<ShiftReportRow> for ShiftReport {
    type Error = PersistenceError;

    fn try_from(row: ShiftReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.report_id),
            worker_id: row.worker_id,
            job_title_id: row.job_title_id,
            start: stored_timestamp("start", &row.start_at)?,
            finish: stored_optional_timestamp("finish", row.finish_at.as_deref())?,
        })
    }
}

/// Retrieves a job title by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_job_title(
    conn: &mut SqliteConnection,
    job_title_id: i64,
) -> Result<Option<JobTitle>, PersistenceError> {
    let row: Option<JobTitleRow> = job_titles::table
        .find(job_title_id)
        .select(JobTitleRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(JobTitle::from))
}

fn filtered_job_titles(params: &ListParams) -> job_titles::BoxedQuery<'static, Sqlite> {
    let mut query = job_titles::table.into_boxed();
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(job_titles::title.like(pattern));
    }
    query
}

/// Lists job titles. Searches the title; default ordering is by title.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_job_titles(
    conn: &mut SqliteConnection,
    params: &ListParams,
) -> Result<Page<JobTitle>, PersistenceError> {
    let count: i64 = filtered_job_titles(params).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_job_titles(params),
        params.ordering.as_deref().unwrap_or("title"),
        {
            "id" => job_titles::job_title_id,
            "title" => job_titles::title,
            "pay_per_hour" => job_titles::pay_per_hour,
        }
    )
    .then_order_by(job_titles::job_title_id.asc());

    let rows: Vec<JobTitleRow> = paginate(query, params)
        .select(JobTitleRow::as_select())
        .load(conn)?;

    Ok(Page {
        count,
        items: rows.into_iter().map(JobTitle::from).collect(),
    })
}

/// Retrieves a worker by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_worker(
    conn: &mut SqliteConnection,
    worker_id: i64,
) -> Result<Option<Worker>, PersistenceError> {
    workers::table
        .find(worker_id)
        .select(WorkerRow::as_select())
        .first(conn)
        .optional()?
        .map(Worker::try_from)
        .transpose()
}

fn filtered_workers(
    params: &ListParams,
    filter: WorkerFilter,
) -> workers::BoxedQuery<'static, Sqlite> {
    let mut query = workers::table.into_boxed();
    if let Some(job_title_id) = filter.main_job_title_id {
        query = query.filter(workers::main_job_title_id.eq(job_title_id));
    }
    if let Some(is_working) = filter.is_working {
        query = query.filter(workers::is_working.eq(i32::from(is_working)));
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(
            workers::name.like(pattern.clone()).or(workers::telegram_username
                .assume_not_null()
                .like(pattern)),
        );
    }
    query
}

/// Lists workers. Searches name and chat username; default ordering is by name.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_workers(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: WorkerFilter,
) -> Result<Page<Worker>, PersistenceError> {
    debug!(?filter, "Listing workers");
    let count: i64 = filtered_workers(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_workers(params, filter),
        params.ordering.as_deref().unwrap_or("name"),
        {
            "id" => workers::worker_id,
            "name" => workers::name,
            "created_at" => workers::created_at,
        }
    )
    .then_order_by(workers::worker_id.asc());

    let items: Vec<Worker> = paginate(query, params)
        .select(WorkerRow::as_select())
        .load::<WorkerRow>(conn)?
        .into_iter()
        .map(Worker::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Retrieves a shift report by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_shift_report(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<Option<ShiftReport>, PersistenceError> {
    shift_reports::table
        .find(report_id)
        .select(ShiftReportRow::as_select())
        .first(conn)
        .optional()?
        .map(ShiftReport::try_from)
        .transpose()
}

/// Returns the open shift of a worker, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn find_open_shift(
    conn: &mut SqliteConnection,
    worker_id: i64,
) -> Result<Option<ShiftReport>, PersistenceError> {
    shift_reports::table
        .filter(shift_reports::worker_id.eq(worker_id))
        .filter(shift_reports::finish_at.is_null())
        .select(ShiftReportRow::as_select())
        .first(conn)
        .optional()?
        .map(ShiftReport::try_from)
        .transpose()
}

fn filtered_shift_reports(filter: ShiftReportFilter) -> shift_reports::BoxedQuery<'static, Sqlite> {
    let mut query = shift_reports::table.into_boxed();
    if let Some(worker_id) = filter.worker_id {
        query = query.filter(shift_reports::worker_id.eq(worker_id));
    }
    if let Some(job_title_id) = filter.job_title_id {
        query = query.filter(shift_reports::job_title_id.eq(job_title_id));
    }
    match filter.open {
        Some(true) => query = query.filter(shift_reports::finish_at.is_null()),
        Some(false) => query = query.filter(shift_reports::finish_at.is_not_null()),
        None => {}
    }
    if let Some(lower) = filter.started.lower_bound() {
        query = query.filter(shift_reports::start_at.ge(lower));
    }
    if let Some(upper) = filter.started.upper_bound_exclusive() {
        query = query.filter(shift_reports::start_at.lt(upper));
    }
    query
}

/// Lists shift reports. Default ordering is newest start first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_shift_reports(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: ShiftReportFilter,
) -> Result<Page<ShiftReport>, PersistenceError> {
    let count: i64 = filtered_shift_reports(filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_shift_reports(filter),
        params.ordering.as_deref().unwrap_or("-start"),
        {
            "id" => shift_reports::report_id,
            "start" => shift_reports::start_at,
            "finish" => shift_reports::finish_at,
        }
    )
    .then_order_by(shift_reports::report_id.asc());

    let items: Vec<ShiftReport> = paginate(query, params)
        .select(ShiftReportRow::as_select())
        .load::<ShiftReportRow>(conn)?
        .into_iter()
        .map(ShiftReport::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Loads every report matching `filter` together with its job title.
///
/// Used by the shift statistics, which need each report's pay rate.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn shift_reports_with_job_titles(
    conn: &mut SqliteConnection,
    filter: ShiftReportFilter,
) -> Result<Vec<(ShiftReport, JobTitle)>, PersistenceError> {
    let mut query = shift_reports::table
        .inner_join(job_titles::table)
        .select((ShiftReportRow::as_select(), JobTitleRow::as_select()))
        .into_boxed();
    if let Some(worker_id) = filter.worker_id {
        query = query.filter(shift_reports::worker_id.eq(worker_id));
    }
    if let Some(job_title_id) = filter.job_title_id {
        query = query.filter(shift_reports::job_title_id.eq(job_title_id));
    }
    match filter.open {
        Some(true) => query = query.filter(shift_reports::finish_at.is_null()),
        Some(false) => query = query.filter(shift_reports::finish_at.is_not_null()),
        None => {}
    }
    if let Some(lower) = filter.started.lower_bound() {
        query = query.filter(shift_reports::start_at.ge(lower));
    }
    if let Some(upper) = filter.started.upper_bound_exclusive() {
        query = query.filter(shift_reports::start_at.lt(upper));
    }

    query
        .order(shift_reports::report_id.asc())
        .load::<(ShiftReportRow, JobTitleRow)>(conn)?
        .into_iter()
        .map(|(report, job_title)| Ok((ShiftReport::try_from(report)?, JobTitle::from(job_title))))
        .collect()
}
