// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::{get, post},
};
use innkeep_api::handlers::{bookings, guests};
use innkeep_api::request_response::bookings::BookingView;
use innkeep_api::request_response::guests::{
    BlacklistRequest, EligibilityView, GuestFilterQuery, GuestPatch, GuestRequest, GuestView,
};
use innkeep_api::{ListQuery, ListResponse};
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{OptionalPayload, Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/guests", get(list_guests).post(create_guest))
        .route("/guests/blacklisted", get(list_blacklisted_guests))
        .route(
            "/guests/{id}",
            get(get_guest)
                .put(update_guest)
                .patch(patch_guest)
                .delete(delete_guest),
        )
        .route("/guests/{id}/bookings", get(list_guest_bookings))
        .route("/guests/{id}/eligibility", get(guest_eligibility))
        .route("/guests/{id}/blacklist", post(blacklist_guest))
        .route("/guests/{id}/unblacklist", post(unblacklist_guest))
}

async fn list_guests(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<GuestFilterQuery>,
) -> JsonResult<ListResponse<GuestView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::list_guests(
        &mut persistence,
        query,
        filter,
        app_state.now(),
    )?))
}

async fn list_blacklisted_guests(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<GuestView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::list_blacklisted_guests(
        &mut persistence,
        query,
        app_state.now(),
    )?))
}

async fn get_guest(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(guest_id): Path<i64>,
) -> JsonResult<GuestView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::get_guest(
        &mut persistence,
        guest_id,
        app_state.now(),
    )?))
}

async fn create_guest(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<GuestRequest>,
) -> CreatedResult<GuestView> {
    info!(operator = %actor.id, last_name = %req.last_name, "Creating guest");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(guests::create_guest(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_guest(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(guest_id): Path<i64>,
    Payload(req): Payload<GuestRequest>,
) -> JsonResult<GuestView> {
    info!(operator = %actor.id, guest_id, "Updating guest");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::update_guest(
        &mut persistence,
        guest_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_guest(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(guest_id): Path<i64>,
    Payload(patch): Payload<GuestPatch>,
) -> JsonResult<GuestView> {
    info!(operator = %actor.id, guest_id, "Patching guest");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::patch_guest(
        &mut persistence,
        guest_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_guest(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(guest_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, guest_id, "Deleting guest");
    let mut persistence = app_state.persistence.lock().await;
    guests::delete_guest(&mut persistence, guest_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_guest_bookings(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(guest_id): Path<i64>,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<BookingView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::list_guest_bookings(
        &mut persistence,
        guest_id,
        query,
    )?))
}

async fn guest_eligibility(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(guest_id): Path<i64>,
) -> JsonResult<EligibilityView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::guest_eligibility(&mut persistence, guest_id)?))
}

async fn blacklist_guest(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(guest_id): Path<i64>,
    OptionalPayload(req): OptionalPayload<BlacklistRequest>,
) -> JsonResult<GuestView> {
    info!(operator = %actor.id, guest_id, "Blacklisting guest");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::blacklist_guest(
        &mut persistence,
        guest_id,
        &req,
        app_state.now(),
    )?))
}

async fn unblacklist_guest(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(guest_id): Path<i64>,
) -> JsonResult<GuestView> {
    info!(operator = %actor.id, guest_id, "Removing guest from blacklist");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(guests::unblacklist_guest(
        &mut persistence,
        guest_id,
        app_state.now(),
    )?))
}
