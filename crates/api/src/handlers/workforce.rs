// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job title, worker and shift ledger handlers.

use std::collections::BTreeMap;

use innkeep_domain::{
    DateRange, DomainError, JobTitle, Money, ShiftReport, ShiftStatistics, ShiftTotals, Worker,
    format_date, format_timestamp, parse_optional_timestamp, summarize_shifts,
};
use innkeep_persistence::{Page, ShiftReportFilter, SqlitePersistence, WorkerFilter};
use time::OffsetDateTime;
use tracing::info;

use super::{Now, date_range, found, id_of, list_params, non_blank, referenced};
use crate::error::ApiError;
use crate::request_response::workforce::{
    CreateReportRequest, FinishShiftRequest, JobTitlePatch, JobTitleRequest, JobTitleShiftTotals,
    JobTitleView, ReportFilterQuery, ShiftReportView, ShiftStatisticsView, ShiftTotalsView,
    StartShiftRequest, WorkerFilterQuery, WorkerPatch, WorkerRequest, WorkerShiftTotals,
    WorkerView,
};
use crate::request_response::{DateRangeQuery, ListQuery, ListResponse, merge};

impl From<JobTitle> for JobTitleView {
    fn from(job_title: JobTitle) -> Self {
        Self {
            id: id_of(job_title.id),
            title: job_title.title,
            pay_per_hour: job_title.pay_per_hour.minor(),
        }
    }
}

impl From<Worker> for WorkerView {
    fn from(worker: Worker) -> Self {
        Self {
            id: id_of(worker.id),
            name: worker.name,
            main_job_title_id: worker.main_job_title_id,
            telegram_id: worker.telegram_id,
            telegram_username: worker.telegram_username,
            is_working: worker.is_working,
            created_at: format_timestamp(worker.created_at),
        }
    }
}

impl From<ShiftTotals> for ShiftTotalsView {
    fn from(totals: ShiftTotals) -> Self {
        Self {
            shifts: totals.shifts,
            seconds: totals.seconds,
            hours: totals.hours(),
            payment: totals.payment.minor(),
        }
    }
}

fn report_view(report: &ShiftReport, rate: Money) -> ShiftReportView {
    ShiftReportView {
        id: id_of(report.id),
        worker_id: report.worker_id,
        job_title_id: report.job_title_id,
        start: format_timestamp(report.start),
        finish: report.finish.map(format_timestamp),
        is_open: report.is_open(),
        duration_seconds: report.duration().map(|d| d.whole_seconds()),
        hours: report.hours(),
        total_payment: report.total_payment(rate).map(|m| m.minor()),
    }
}

/// Renders a page of reports, looking up each distinct job title once.
fn report_views(
    persistence: &mut SqlitePersistence,
    page: Page<ShiftReport>,
) -> Result<ListResponse<ShiftReportView>, ApiError> {
    let mut rates: BTreeMap<i64, Money> = BTreeMap::new();
    for report in &page.items {
        if !rates.contains_key(&report.job_title_id) {
            let rate: Money = persistence
                .get_job_title(report.job_title_id)?
                .map_or(Money::ZERO, |j| j.pay_per_hour);
            rates.insert(report.job_title_id, rate);
        }
    }
    Ok(ListResponse::from(page.map(|report| {
        let rate: Money = rates
            .get(&report.job_title_id)
            .copied()
            .unwrap_or(Money::ZERO);
        report_view(&report, rate)
    })))
}

// ========================================================================
// Job titles
// ========================================================================

/// Lists job titles.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_job_titles(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
) -> Result<ListResponse<JobTitleView>, ApiError> {
    let page: Page<JobTitle> = persistence.list_job_titles(&list_params(query)?)?;
    Ok(ListResponse::from(page.map(JobTitleView::from)))
}

/// Retrieves one job title.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_job_title(
    persistence: &mut SqlitePersistence,
    job_title_id: i64,
) -> Result<JobTitleView, ApiError> {
    let job_title: JobTitle = found(persistence.get_job_title(job_title_id)?, "JobTitle", job_title_id)?;
    Ok(JobTitleView::from(job_title))
}

/// Creates a job title.
///
/// # Errors
///
/// Returns an error if the title is blank or taken, or the rate is not
/// positive.
pub fn create_job_title(
    persistence: &mut SqlitePersistence,
    request: JobTitleRequest,
) -> Result<JobTitleView, ApiError> {
    let mut job_title: JobTitle = JobTitle {
        id: None,
        title: request.title.trim().to_string(),
        pay_per_hour: Money::from_minor(request.pay_per_hour),
    };
    job_title.validate()?;
    job_title.id = Some(persistence.insert_job_title(&job_title)?);
    Ok(JobTitleView::from(job_title))
}

/// Replaces a job title.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_job_title(
    persistence: &mut SqlitePersistence,
    job_title_id: i64,
    request: JobTitleRequest,
) -> Result<JobTitleView, ApiError> {
    found(persistence.get_job_title(job_title_id)?, "JobTitle", job_title_id)?;
    let job_title: JobTitle = JobTitle {
        id: Some(job_title_id),
        title: request.title.trim().to_string(),
        pay_per_hour: Money::from_minor(request.pay_per_hour),
    };
    job_title.validate()?;
    persistence.update_job_title(job_title_id, &job_title)?;
    Ok(JobTitleView::from(job_title))
}

/// Partially updates a job title.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_job_title(
    persistence: &mut SqlitePersistence,
    job_title_id: i64,
    patch: JobTitlePatch,
) -> Result<JobTitleView, ApiError> {
    let existing: JobTitle = found(persistence.get_job_title(job_title_id)?, "JobTitle", job_title_id)?;
    let mut request: JobTitleRequest = JobTitleRequest {
        title: existing.title,
        pay_per_hour: existing.pay_per_hour.minor(),
    };
    merge(&mut request.title, patch.title);
    merge(&mut request.pay_per_hour, patch.pay_per_hour);
    update_job_title(persistence, job_title_id, request)
}

/// Deletes a job title no worker or report uses.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_job_title(
    persistence: &mut SqlitePersistence,
    job_title_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_job_title(job_title_id)?;
    Ok(())
}

/// Lists the workers whose main job title is `job_title_id`.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown job title.
pub fn list_job_title_workers(
    persistence: &mut SqlitePersistence,
    job_title_id: i64,
    query: ListQuery,
) -> Result<ListResponse<WorkerView>, ApiError> {
    found(persistence.get_job_title(job_title_id)?, "JobTitle", job_title_id)?;
    let filter: WorkerFilter = WorkerFilter {
        main_job_title_id: Some(job_title_id),
        is_working: None,
    };
    let page: Page<Worker> = persistence.list_workers(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(WorkerView::from)))
}

// ========================================================================
// Workers
// ========================================================================

/// Lists workers.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_workers(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: WorkerFilterQuery,
) -> Result<ListResponse<WorkerView>, ApiError> {
    let filter: WorkerFilter = WorkerFilter {
        main_job_title_id: filter.main_job_title_id,
        is_working: filter.is_working,
    };
    let page: Page<Worker> = persistence.list_workers(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(WorkerView::from)))
}

/// Lists workers with an open shift.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_working_workers(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
) -> Result<ListResponse<WorkerView>, ApiError> {
    list_workers(
        persistence,
        query,
        WorkerFilterQuery {
            main_job_title_id: None,
            is_working: Some(true),
        },
    )
}

/// Retrieves one worker.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_worker(persistence: &mut SqlitePersistence, worker_id: i64) -> Result<WorkerView, ApiError> {
    let worker: Worker = found(persistence.get_worker(worker_id)?, "Worker", worker_id)?;
    Ok(WorkerView::from(worker))
}

fn worker_from_request(
    persistence: &mut SqlitePersistence,
    request: WorkerRequest,
    base: Worker,
) -> Result<Worker, ApiError> {
    if let Some(job_title_id) = request.main_job_title_id {
        referenced(
            persistence.get_job_title(job_title_id)?,
            "main_job_title_id",
            job_title_id,
        )?;
    }
    let worker: Worker = Worker {
        name: request.name.trim().to_string(),
        main_job_title_id: request.main_job_title_id,
        telegram_id: request.telegram_id,
        telegram_username: non_blank(request.telegram_username),
        ..base
    };
    worker.validate()?;
    Ok(worker)
}

/// Registers a worker. New workers are not working.
///
/// # Errors
///
/// Returns an error for invalid input, an unknown job title, or a taken
/// chat identity.
pub fn create_worker(
    persistence: &mut SqlitePersistence,
    request: WorkerRequest,
    now: Now,
) -> Result<WorkerView, ApiError> {
    let base: Worker = Worker {
        id: None,
        name: String::new(),
        main_job_title_id: None,
        telegram_id: 0,
        telegram_username: None,
        is_working: false,
        created_at: now.instant,
    };
    let mut worker: Worker = worker_from_request(persistence, request, base)?;
    worker.id = Some(persistence.insert_worker(&worker)?);
    Ok(WorkerView::from(worker))
}

/// Replaces a worker's editable fields.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_worker(
    persistence: &mut SqlitePersistence,
    worker_id: i64,
    request: WorkerRequest,
) -> Result<WorkerView, ApiError> {
    let existing: Worker = found(persistence.get_worker(worker_id)?, "Worker", worker_id)?;
    let worker: Worker = worker_from_request(persistence, request, existing)?;
    persistence.update_worker(worker_id, &worker)?;
    Ok(WorkerView::from(worker))
}

/// Partially updates a worker.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_worker(
    persistence: &mut SqlitePersistence,
    worker_id: i64,
    patch: WorkerPatch,
) -> Result<WorkerView, ApiError> {
    let existing: Worker = found(persistence.get_worker(worker_id)?, "Worker", worker_id)?;
    let mut request: WorkerRequest = WorkerRequest {
        name: existing.name,
        main_job_title_id: existing.main_job_title_id,
        telegram_id: existing.telegram_id,
        telegram_username: existing.telegram_username,
    };
    merge(&mut request.name, patch.name);
    merge(&mut request.main_job_title_id, patch.main_job_title_id);
    merge(&mut request.telegram_id, patch.telegram_id);
    merge(&mut request.telegram_username, patch.telegram_username);
    update_worker(persistence, worker_id, request)
}

/// Deletes a worker nothing references.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_worker(persistence: &mut SqlitePersistence, worker_id: i64) -> Result<(), ApiError> {
    persistence.delete_worker(worker_id)?;
    Ok(())
}

// ========================================================================
// Shift ledger
// ========================================================================

/// Starts a shift for a worker and marks them working.
///
/// Without an explicit job title the worker's main job title is used.
///
/// # Errors
///
/// Returns an error if the worker is unknown, no job title can be
/// resolved, or the worker already has an open shift.
pub fn start_shift(
    persistence: &mut SqlitePersistence,
    worker_id: i64,
    request: StartShiftRequest,
    now: Now,
) -> Result<ShiftReportView, ApiError> {
    persistence.in_transaction(|p| {
        let worker: Worker = found(p.get_worker(worker_id)?, "Worker", worker_id)?;
        let job_title_id: i64 = worker.shift_job_title(request.job_title_id)?;
        let job_title: JobTitle =
            referenced(p.get_job_title(job_title_id)?, "job_title_id", job_title_id)?;

        let open: Option<ShiftReport> = p.find_open_shift(worker_id)?;
        let mut report: ShiftReport =
            ShiftReport::start(worker_id, job_title_id, open.as_ref(), now.instant)?;
        report.id = Some(p.insert_shift_report(&report)?);
        p.set_worker_working(worker_id, true)?;

        Ok(report_view(&report, job_title.pay_per_hour))
    })
}

/// `POST /reports`: starts a shift for the worker named in the body.
///
/// # Errors
///
/// Returns an error if the worker does not exist or the shift cannot
/// start.
pub fn create_report(
    persistence: &mut SqlitePersistence,
    request: CreateReportRequest,
    now: Now,
) -> Result<ShiftReportView, ApiError> {
    referenced(
        persistence.get_worker(request.worker_id)?,
        "worker_id",
        request.worker_id,
    )?;
    start_shift(
        persistence,
        request.worker_id,
        StartShiftRequest {
            job_title_id: request.job_title_id,
        },
        now,
    )
}

fn close_report(
    persistence: &mut SqlitePersistence,
    mut report: ShiftReport,
    request: FinishShiftRequest,
    now: Now,
) -> Result<ShiftReportView, ApiError> {
    let finish: OffsetDateTime =
        parse_optional_timestamp("finish", request.finish.as_deref())?.unwrap_or(now.instant);
    persistence.in_transaction(|p| {
        report.finish(finish)?;
        p.finish_shift_report(&report)?;
        p.set_worker_working(report.worker_id, false)?;
        let rate: Money = p
            .get_job_title(report.job_title_id)?
            .map_or(Money::ZERO, |j| j.pay_per_hour);
        Ok(report_view(&report, rate))
    })
}

/// Finishes the worker's open shift.
///
/// # Errors
///
/// Returns an error if the worker is unknown, has no open shift, or the
/// finish time precedes the start.
pub fn finish_shift(
    persistence: &mut SqlitePersistence,
    worker_id: i64,
    request: FinishShiftRequest,
    now: Now,
) -> Result<ShiftReportView, ApiError> {
    found(persistence.get_worker(worker_id)?, "Worker", worker_id)?;
    let report: ShiftReport = persistence
        .find_open_shift(worker_id)?
        .ok_or(DomainError::NoOpenShift { worker_id })?;
    let view: ShiftReportView = close_report(persistence, report, request, now)?;
    info!(worker_id, report_id = view.id, "Finished shift by worker");
    Ok(view)
}

/// Finishes a shift by report ID.
///
/// # Errors
///
/// Returns an error if the report is unknown or already finished, or the
/// finish time precedes the start.
pub fn finish_report(
    persistence: &mut SqlitePersistence,
    report_id: i64,
    request: FinishShiftRequest,
    now: Now,
) -> Result<ShiftReportView, ApiError> {
    let report: ShiftReport = found(persistence.get_shift_report(report_id)?, "Report", report_id)?;
    close_report(persistence, report, request, now)
}

/// Retrieves one shift report.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_report(
    persistence: &mut SqlitePersistence,
    report_id: i64,
) -> Result<ShiftReportView, ApiError> {
    let report: ShiftReport = found(persistence.get_shift_report(report_id)?, "Report", report_id)?;
    let rate: Money = persistence
        .get_job_title(report.job_title_id)?
        .map_or(Money::ZERO, |j| j.pay_per_hour);
    Ok(report_view(&report, rate))
}

/// Lists shift reports.
///
/// # Errors
///
/// Returns an error for invalid parameters or a failed query.
pub fn list_reports(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: ReportFilterQuery,
    now: Now,
) -> Result<ListResponse<ShiftReportView>, ApiError> {
    let started: DateRange =
        date_range(filter.date_from.as_deref(), filter.date_to.as_deref(), now)?;
    let filter: ShiftReportFilter = ShiftReportFilter {
        worker_id: filter.worker_id,
        job_title_id: filter.job_title_id,
        open: filter.open,
        started,
    };
    let page: Page<ShiftReport> = persistence.list_shift_reports(&list_params(query)?, filter)?;
    report_views(persistence, page)
}

/// Lists open shifts.
///
/// # Errors
///
/// Returns an error for invalid parameters or a failed query.
pub fn list_active_reports(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<ShiftReportView>, ApiError> {
    list_reports(
        persistence,
        query,
        ReportFilterQuery {
            open: Some(true),
            ..ReportFilterQuery::default()
        },
        now,
    )
}

/// Lists one worker's shift reports.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown worker.
pub fn list_worker_reports(
    persistence: &mut SqlitePersistence,
    worker_id: i64,
    query: ListQuery,
    filter: ReportFilterQuery,
    now: Now,
) -> Result<ListResponse<ShiftReportView>, ApiError> {
    found(persistence.get_worker(worker_id)?, "Worker", worker_id)?;
    list_reports(
        persistence,
        query,
        ReportFilterQuery {
            worker_id: Some(worker_id),
            ..filter
        },
        now,
    )
}

fn shift_statistics(
    persistence: &mut SqlitePersistence,
    worker_id: Option<i64>,
    range: &DateRangeQuery,
    now: Now,
) -> Result<ShiftStatisticsView, ApiError> {
    let started: DateRange =
        date_range(range.date_from.as_deref(), range.date_to.as_deref(), now)?;
    let rows: Vec<(ShiftReport, JobTitle)> =
        persistence.shift_reports_with_job_titles(ShiftReportFilter {
            worker_id,
            job_title_id: None,
            open: Some(false),
            started,
        })?;
    let stats: ShiftStatistics = summarize_shifts(rows.iter().map(|(r, j)| (r, j)));

    Ok(ShiftStatisticsView {
        date_from: started.from.map(format_date),
        date_to: started.to.map(format_date),
        overall: ShiftTotalsView::from(stats.overall),
        by_worker: stats
            .by_worker
            .into_iter()
            .map(|(worker_id, totals)| WorkerShiftTotals {
                worker_id,
                totals: ShiftTotalsView::from(totals),
            })
            .collect(),
        by_job_title: stats
            .by_job_title
            .into_iter()
            .map(|(job_title, totals)| JobTitleShiftTotals {
                job_title,
                totals: ShiftTotalsView::from(totals),
            })
            .collect(),
    })
}

/// Aggregates finished shifts across all workers.
///
/// A range without reports yields zero totals.
///
/// # Errors
///
/// Returns an error for a malformed date range.
pub fn report_statistics(
    persistence: &mut SqlitePersistence,
    range: &DateRangeQuery,
    now: Now,
) -> Result<ShiftStatisticsView, ApiError> {
    shift_statistics(persistence, None, range, now)
}

/// Aggregates one worker's finished shifts.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown worker or an error for a
/// malformed date range.
pub fn worker_statistics(
    persistence: &mut SqlitePersistence,
    worker_id: i64,
    range: &DateRangeQuery,
    now: Now,
) -> Result<ShiftStatisticsView, ApiError> {
    found(persistence.get_worker(worker_id)?, "Worker", worker_id)?;
    shift_statistics(persistence, Some(worker_id), range, now)
}
