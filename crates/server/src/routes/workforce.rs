// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job titles, workers and shift reports.
//!
//! Reports have no update or delete routes: they are opened by a start
//! and closed by a finish.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::{get, post},
};
use innkeep_api::handlers::workforce;
use innkeep_api::request_response::DateRangeQuery;
use innkeep_api::request_response::workforce::{
    CreateReportRequest, FinishShiftRequest, JobTitlePatch, JobTitleRequest, JobTitleView,
    ReportFilterQuery, ShiftReportView, ShiftStatisticsView, StartShiftRequest, WorkerFilterQuery,
    WorkerPatch, WorkerRequest, WorkerView,
};
use innkeep_api::{ListQuery, ListResponse};
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{OptionalPayload, Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/job-titles", get(list_job_titles).post(create_job_title))
        .route(
            "/job-titles/{id}",
            get(get_job_title)
                .put(update_job_title)
                .patch(patch_job_title)
                .delete(delete_job_title),
        )
        .route("/job-titles/{id}/workers", get(list_job_title_workers))
        .route("/workers", get(list_workers).post(create_worker))
        .route("/workers/working", get(list_working_workers))
        .route(
            "/workers/{id}",
            get(get_worker)
                .put(update_worker)
                .patch(patch_worker)
                .delete(delete_worker),
        )
        .route("/workers/{id}/reports", get(list_worker_reports))
        .route("/workers/{id}/statistics", get(worker_statistics))
        .route("/workers/{id}/start-shift", post(start_shift))
        .route("/workers/{id}/finish-shift", post(finish_shift))
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/active", get(list_active_reports))
        .route("/reports/statistics", get(report_statistics))
        .route("/reports/{id}", get(get_report))
        .route("/reports/{id}/finish", post(finish_report))
}

async fn list_job_titles(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<JobTitleView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_job_titles(&mut persistence, query)?))
}

async fn get_job_title(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(job_title_id): Path<i64>,
) -> JsonResult<JobTitleView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::get_job_title(&mut persistence, job_title_id)?))
}

async fn create_job_title(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<JobTitleRequest>,
) -> CreatedResult<JobTitleView> {
    info!(operator = %actor.id, title = %req.title, "Creating job title");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(workforce::create_job_title(&mut persistence, req)?))
}

async fn update_job_title(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(job_title_id): Path<i64>,
    Payload(req): Payload<JobTitleRequest>,
) -> JsonResult<JobTitleView> {
    info!(operator = %actor.id, job_title_id, "Updating job title");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::update_job_title(
        &mut persistence,
        job_title_id,
        req,
    )?))
}

async fn patch_job_title(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(job_title_id): Path<i64>,
    Payload(patch): Payload<JobTitlePatch>,
) -> JsonResult<JobTitleView> {
    info!(operator = %actor.id, job_title_id, "Patching job title");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::patch_job_title(
        &mut persistence,
        job_title_id,
        patch,
    )?))
}

async fn delete_job_title(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(job_title_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, job_title_id, "Deleting job title");
    let mut persistence = app_state.persistence.lock().await;
    workforce::delete_job_title(&mut persistence, job_title_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_job_title_workers(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(job_title_id): Path<i64>,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<WorkerView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_job_title_workers(
        &mut persistence,
        job_title_id,
        query,
    )?))
}

async fn list_workers(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<WorkerFilterQuery>,
) -> JsonResult<ListResponse<WorkerView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_workers(&mut persistence, query, filter)?))
}

async fn list_working_workers(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<WorkerView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_working_workers(&mut persistence, query)?))
}

async fn get_worker(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(worker_id): Path<i64>,
) -> JsonResult<WorkerView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::get_worker(&mut persistence, worker_id)?))
}

async fn create_worker(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<WorkerRequest>,
) -> CreatedResult<WorkerView> {
    info!(operator = %actor.id, telegram_id = req.telegram_id, "Creating worker");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(workforce::create_worker(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_worker(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(worker_id): Path<i64>,
    Payload(req): Payload<WorkerRequest>,
) -> JsonResult<WorkerView> {
    info!(operator = %actor.id, worker_id, "Updating worker");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::update_worker(&mut persistence, worker_id, req)?))
}

async fn patch_worker(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(worker_id): Path<i64>,
    Payload(patch): Payload<WorkerPatch>,
) -> JsonResult<WorkerView> {
    info!(operator = %actor.id, worker_id, "Patching worker");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::patch_worker(&mut persistence, worker_id, patch)?))
}

async fn delete_worker(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(worker_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, worker_id, "Deleting worker");
    let mut persistence = app_state.persistence.lock().await;
    workforce::delete_worker(&mut persistence, worker_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_worker_reports(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(worker_id): Path<i64>,
    Params(query): Params<ListQuery>,
    Params(filter): Params<ReportFilterQuery>,
) -> JsonResult<ListResponse<ShiftReportView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_worker_reports(
        &mut persistence,
        worker_id,
        query,
        filter,
        app_state.now(),
    )?))
}

async fn worker_statistics(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(worker_id): Path<i64>,
    Params(range): Params<DateRangeQuery>,
) -> JsonResult<ShiftStatisticsView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::worker_statistics(
        &mut persistence,
        worker_id,
        &range,
        app_state.now(),
    )?))
}

async fn start_shift(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(worker_id): Path<i64>,
    OptionalPayload(req): OptionalPayload<StartShiftRequest>,
) -> CreatedResult<ShiftReportView> {
    info!(operator = %actor.id, worker_id, "Starting shift");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(workforce::start_shift(
        &mut persistence,
        worker_id,
        req,
        app_state.now(),
    )?))
}

async fn finish_shift(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(worker_id): Path<i64>,
    OptionalPayload(req): OptionalPayload<FinishShiftRequest>,
) -> JsonResult<ShiftReportView> {
    info!(operator = %actor.id, worker_id, "Finishing shift");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::finish_shift(
        &mut persistence,
        worker_id,
        req,
        app_state.now(),
    )?))
}

async fn list_reports(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<ReportFilterQuery>,
) -> JsonResult<ListResponse<ShiftReportView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_reports(
        &mut persistence,
        query,
        filter,
        app_state.now(),
    )?))
}

async fn create_report(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<CreateReportRequest>,
) -> CreatedResult<ShiftReportView> {
    info!(operator = %actor.id, worker_id = req.worker_id, "Starting shift via report");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(workforce::create_report(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn list_active_reports(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<ShiftReportView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::list_active_reports(
        &mut persistence,
        query,
        app_state.now(),
    )?))
}

async fn report_statistics(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(range): Params<DateRangeQuery>,
) -> JsonResult<ShiftStatisticsView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::report_statistics(
        &mut persistence,
        &range,
        app_state.now(),
    )?))
}

async fn get_report(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(report_id): Path<i64>,
) -> JsonResult<ShiftReportView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::get_report(&mut persistence, report_id)?))
}

async fn finish_report(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(report_id): Path<i64>,
    OptionalPayload(req): OptionalPayload<FinishShiftRequest>,
) -> JsonResult<ShiftReportView> {
    info!(operator = %actor.id, report_id, "Finishing shift via report");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(workforce::finish_report(
        &mut persistence,
        report_id,
        req,
        app_state.now(),
    )?))
}
