// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goods and services.
//!
//! Both collections share these handlers; the collection's
//! [`CatalogKind`] reaches them as a request extension.

use axum::{
    Extension, Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::get,
};
use innkeep_api::handlers::catalog;
use innkeep_api::request_response::catalog::{
    CatalogItemPatch, CatalogItemRequest, CatalogItemView, CatalogStatisticsView,
};
use innkeep_api::{ListQuery, ListResponse};
use innkeep_domain::CatalogKind;
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(collection("goods", CatalogKind::Goods))
        .merge(collection("services", CatalogKind::Service))
}

fn collection(name: &str, kind: CatalogKind) -> Router<AppState> {
    Router::new()
        .route(&format!("/{name}"), get(list_items).post(create_item))
        .route(&format!("/{name}/relevant"), get(list_relevant_items))
        .route(&format!("/{name}/statistics"), get(item_statistics))
        .route(
            &format!("/{name}/{{id}}"),
            get(get_item)
                .put(update_item)
                .patch(patch_item)
                .delete(delete_item),
        )
        .layer(Extension(kind))
}

async fn list_items(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<CatalogItemView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::list_items(
        &mut persistence,
        kind,
        query,
        app_state.now(),
    )?))
}

async fn list_relevant_items(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<CatalogItemView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::list_relevant_items(
        &mut persistence,
        kind,
        query,
        app_state.now(),
    )?))
}

async fn item_statistics(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    _: SessionOperator,
) -> JsonResult<CatalogStatisticsView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::item_statistics(
        &mut persistence,
        kind,
        app_state.now(),
    )?))
}

async fn get_item(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    _: SessionOperator,
    Path(item_id): Path<i64>,
) -> JsonResult<CatalogItemView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::get_item(
        &mut persistence,
        kind,
        item_id,
        app_state.now(),
    )?))
}

async fn create_item(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<CatalogItemRequest>,
) -> CreatedResult<CatalogItemView> {
    info!(operator = %actor.id, kind = kind.as_str(), name = %req.name, "Creating catalog item");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(catalog::create_item(
        &mut persistence,
        kind,
        req,
        app_state.now(),
    )?))
}

async fn update_item(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    SessionOperator(actor, _): SessionOperator,
    Path(item_id): Path<i64>,
    Payload(req): Payload<CatalogItemRequest>,
) -> JsonResult<CatalogItemView> {
    info!(operator = %actor.id, kind = kind.as_str(), item_id, "Updating catalog item");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::update_item(
        &mut persistence,
        kind,
        item_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_item(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    SessionOperator(actor, _): SessionOperator,
    Path(item_id): Path<i64>,
    Payload(patch): Payload<CatalogItemPatch>,
) -> JsonResult<CatalogItemView> {
    info!(operator = %actor.id, kind = kind.as_str(), item_id, "Patching catalog item");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::patch_item(
        &mut persistence,
        kind,
        item_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_item(
    AxumState(app_state): AxumState<AppState>,
    Extension(kind): Extension<CatalogKind>,
    SessionOperator(actor, _): SessionOperator,
    Path(item_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, kind = kind.as_str(), item_id, "Deleting catalog item");
    let mut persistence = app_state.persistence.lock().await;
    catalog::delete_item(&mut persistence, kind, item_id)?;
    Ok(StatusCode::NO_CONTENT)
}
