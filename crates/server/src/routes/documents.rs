// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationalities and identity documents.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::get,
};
use innkeep_api::handlers::documents;
use innkeep_api::request_response::DaysQuery;
use innkeep_api::request_response::documents::{
    DocumentFilterQuery, DocumentPatch, DocumentRequest, DocumentStatisticsView,
    DocumentVerificationView, DocumentView, NationalIdQuery, NationalityPatch, NationalityRequest,
    NationalityView,
};
use innkeep_api::{ListQuery, ListResponse};
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nationalities", get(list_nationalities).post(create_nationality))
        .route(
            "/nationalities/{id}",
            get(get_nationality)
                .put(update_nationality)
                .patch(patch_nationality)
                .delete(delete_nationality),
        )
        .route("/nationalities/{id}/documents", get(list_nationality_documents))
        .route("/documents", get(list_documents).post(create_document))
        .route("/documents/expiring-soon", get(list_expiring_documents))
        .route("/documents/expired", get(list_expired_documents))
        .route("/documents/statistics", get(document_statistics))
        .route("/documents/by-national-id", get(find_by_national_id))
        .route(
            "/documents/{id}",
            get(get_document)
                .put(update_document)
                .patch(patch_document)
                .delete(delete_document),
        )
        .route("/documents/{id}/verify", get(verify_document))
}

async fn list_nationalities(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<NationalityView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::list_nationalities(&mut persistence, query)?))
}

async fn get_nationality(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(nationality_id): Path<i64>,
) -> JsonResult<NationalityView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::get_nationality(
        &mut persistence,
        nationality_id,
    )?))
}

async fn create_nationality(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<NationalityRequest>,
) -> CreatedResult<NationalityView> {
    info!(operator = %actor.id, name = %req.name, "Creating nationality");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(documents::create_nationality(&mut persistence, req)?))
}

async fn update_nationality(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(nationality_id): Path<i64>,
    Payload(req): Payload<NationalityRequest>,
) -> JsonResult<NationalityView> {
    info!(operator = %actor.id, nationality_id, "Updating nationality");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::update_nationality(
        &mut persistence,
        nationality_id,
        req,
    )?))
}

async fn patch_nationality(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(nationality_id): Path<i64>,
    Payload(patch): Payload<NationalityPatch>,
) -> JsonResult<NationalityView> {
    info!(operator = %actor.id, nationality_id, "Patching nationality");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::patch_nationality(
        &mut persistence,
        nationality_id,
        patch,
    )?))
}

async fn delete_nationality(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(nationality_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, nationality_id, "Deleting nationality");
    let mut persistence = app_state.persistence.lock().await;
    documents::delete_nationality(&mut persistence, nationality_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_nationality_documents(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(nationality_id): Path<i64>,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<DocumentView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::list_nationality_documents(
        &mut persistence,
        nationality_id,
        query,
        app_state.now(),
    )?))
}

async fn list_documents(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<DocumentFilterQuery>,
) -> JsonResult<ListResponse<DocumentView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::list_documents(
        &mut persistence,
        query,
        filter,
        app_state.now(),
    )?))
}

async fn get_document(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(document_id): Path<i64>,
) -> JsonResult<DocumentView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::get_document(
        &mut persistence,
        document_id,
        app_state.now(),
    )?))
}

async fn create_document(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<DocumentRequest>,
) -> CreatedResult<DocumentView> {
    info!(operator = %actor.id, nationality_id = req.nationality_id, "Creating document");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(documents::create_document(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_document(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(document_id): Path<i64>,
    Payload(req): Payload<DocumentRequest>,
) -> JsonResult<DocumentView> {
    info!(operator = %actor.id, document_id, "Updating document");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::update_document(
        &mut persistence,
        document_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_document(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(document_id): Path<i64>,
    Payload(patch): Payload<DocumentPatch>,
) -> JsonResult<DocumentView> {
    info!(operator = %actor.id, document_id, "Patching document");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::patch_document(
        &mut persistence,
        document_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_document(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(document_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, document_id, "Deleting document");
    let mut persistence = app_state.persistence.lock().await;
    documents::delete_document(&mut persistence, document_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_expiring_documents(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<DaysQuery>,
) -> JsonResult<ListResponse<DocumentView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::list_expiring_documents(
        &mut persistence,
        query,
        app_state.now(),
    )?))
}

async fn list_expired_documents(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
) -> JsonResult<ListResponse<DocumentView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::list_expired_documents(
        &mut persistence,
        app_state.now(),
    )?))
}

async fn document_statistics(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
) -> JsonResult<DocumentStatisticsView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::document_statistics_view(
        &mut persistence,
        app_state.now(),
    )?))
}

async fn find_by_national_id(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<NationalIdQuery>,
) -> JsonResult<DocumentView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::find_document_by_national_id(
        &mut persistence,
        query,
        app_state.now(),
    )?))
}

async fn verify_document(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(document_id): Path<i64>,
    Params(query): Params<DaysQuery>,
) -> JsonResult<DocumentVerificationView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(documents::verify_document(
        &mut persistence,
        document_id,
        query,
        app_state.now(),
    )?))
}
