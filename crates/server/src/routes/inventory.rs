// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room types, rooms and room conditions.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::get,
};
use innkeep_api::handlers::inventory;
use innkeep_api::request_response::inventory::{
    RoomConditionFilterQuery, RoomConditionPatch, RoomConditionRequest, RoomConditionView,
    RoomFilterQuery, RoomPatch, RoomRequest, RoomTypeFilterQuery, RoomTypePatch, RoomTypeRequest,
    RoomTypeView, RoomView,
};
use innkeep_api::{ListQuery, ListResponse};
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/room-types", get(list_room_types).post(create_room_type))
        .route("/room-types/active", get(list_active_room_types))
        .route("/room-types/relevant", get(list_relevant_room_types))
        .route(
            "/room-types/{id}",
            get(get_room_type)
                .put(update_room_type)
                .patch(patch_room_type)
                .delete(delete_room_type),
        )
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/available", get(list_available_rooms))
        .route(
            "/rooms/{id}",
            get(get_room)
                .put(update_room)
                .patch(patch_room)
                .delete(delete_room),
        )
        .route(
            "/room-conditions",
            get(list_room_conditions).post(create_room_condition),
        )
        .route(
            "/room-conditions/{id}",
            get(get_room_condition)
                .put(update_room_condition)
                .patch(patch_room_condition)
                .delete(delete_room_condition),
        )
}

async fn list_room_types(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<RoomTypeFilterQuery>,
) -> JsonResult<ListResponse<RoomTypeView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::list_room_types(
        &mut persistence,
        query,
        filter,
        app_state.now(),
    )?))
}

async fn list_active_room_types(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<RoomTypeView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::list_active_room_types(
        &mut persistence,
        query,
        app_state.now(),
    )?))
}

async fn list_relevant_room_types(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<RoomTypeView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::list_relevant_room_types(
        &mut persistence,
        query,
        app_state.now(),
    )?))
}

async fn get_room_type(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(room_type_id): Path<i64>,
) -> JsonResult<RoomTypeView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::get_room_type(
        &mut persistence,
        room_type_id,
        app_state.now(),
    )?))
}

async fn create_room_type(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<RoomTypeRequest>,
) -> CreatedResult<RoomTypeView> {
    info!(operator = %actor.id, title = %req.title, "Creating room type");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(inventory::create_room_type(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_room_type(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_type_id): Path<i64>,
    Payload(req): Payload<RoomTypeRequest>,
) -> JsonResult<RoomTypeView> {
    info!(operator = %actor.id, room_type_id, "Updating room type");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::update_room_type(
        &mut persistence,
        room_type_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_room_type(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_type_id): Path<i64>,
    Payload(patch): Payload<RoomTypePatch>,
) -> JsonResult<RoomTypeView> {
    info!(operator = %actor.id, room_type_id, "Patching room type");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::patch_room_type(
        &mut persistence,
        room_type_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_room_type(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_type_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, room_type_id, "Deleting room type");
    let mut persistence = app_state.persistence.lock().await;
    inventory::delete_room_type(&mut persistence, room_type_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_rooms(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<RoomFilterQuery>,
) -> JsonResult<ListResponse<RoomView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::list_rooms(&mut persistence, query, filter)?))
}

async fn list_available_rooms(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<RoomView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::list_available_rooms(&mut persistence, query)?))
}

async fn get_room(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(room_id): Path<i64>,
) -> JsonResult<RoomView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::get_room(&mut persistence, room_id)?))
}

async fn create_room(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<RoomRequest>,
) -> CreatedResult<RoomView> {
    info!(operator = %actor.id, number = req.number, "Creating room");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(inventory::create_room(&mut persistence, req)?))
}

async fn update_room(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_id): Path<i64>,
    Payload(req): Payload<RoomRequest>,
) -> JsonResult<RoomView> {
    info!(operator = %actor.id, room_id, "Updating room");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::update_room(
        &mut persistence,
        room_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_room(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_id): Path<i64>,
    Payload(patch): Payload<RoomPatch>,
) -> JsonResult<RoomView> {
    info!(operator = %actor.id, room_id, "Patching room");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::patch_room(
        &mut persistence,
        room_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_room(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, room_id, "Deleting room");
    let mut persistence = app_state.persistence.lock().await;
    inventory::delete_room(&mut persistence, room_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_room_conditions(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<RoomConditionFilterQuery>,
) -> JsonResult<ListResponse<RoomConditionView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::list_room_conditions(
        &mut persistence,
        query,
        filter,
    )?))
}

async fn get_room_condition(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(room_condition_id): Path<i64>,
) -> JsonResult<RoomConditionView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::get_room_condition(
        &mut persistence,
        room_condition_id,
    )?))
}

async fn create_room_condition(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<RoomConditionRequest>,
) -> CreatedResult<RoomConditionView> {
    info!(operator = %actor.id, label = %req.label, "Creating room condition");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(inventory::create_room_condition(
        &mut persistence,
        req,
    )?))
}

async fn update_room_condition(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_condition_id): Path<i64>,
    Payload(req): Payload<RoomConditionRequest>,
) -> JsonResult<RoomConditionView> {
    info!(operator = %actor.id, room_condition_id, "Updating room condition");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::update_room_condition(
        &mut persistence,
        room_condition_id,
        req,
    )?))
}

async fn patch_room_condition(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_condition_id): Path<i64>,
    Payload(patch): Payload<RoomConditionPatch>,
) -> JsonResult<RoomConditionView> {
    info!(operator = %actor.id, room_condition_id, "Patching room condition");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(inventory::patch_room_condition(
        &mut persistence,
        room_condition_id,
        patch,
    )?))
}

async fn delete_room_condition(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(room_condition_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, room_condition_id, "Deleting room condition");
    let mut persistence = app_state.persistence.lock().await;
    inventory::delete_room_condition(&mut persistence, room_condition_id)?;
    Ok(StatusCode::NO_CONTENT)
}
