// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookings, their lifecycle actions, and booking cards.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::{get, post},
};
use innkeep_api::handlers::bookings;
use innkeep_api::request_response::bookings::{
    AddBookingRequest, AddItemsRequest, BookingCardFilterQuery, BookingCardPatch,
    BookingCardRequest, BookingCardView, BookingFilterQuery, BookingPatch, BookingRequest,
    BookingView, RecalculateResponse,
};
use innkeep_api::{ListQuery, ListResponse};
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/active", get(list_active_bookings))
        .route(
            "/bookings/{id}",
            get(get_booking)
                .put(update_booking)
                .patch(patch_booking)
                .delete(delete_booking),
        )
        .route("/bookings/{id}/check-in", post(check_in_booking))
        .route("/bookings/{id}/check-out", post(check_out_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/booking-cards", get(list_booking_cards).post(create_booking_card))
        .route(
            "/booking-cards/{id}",
            get(get_booking_card)
                .put(update_booking_card)
                .patch(patch_booking_card)
                .delete(delete_booking_card),
        )
        .route("/booking-cards/{id}/recalculate", post(recalculate_booking_card))
        .route("/booking-cards/{id}/add-booking", post(add_booking_to_card))
        .route("/booking-cards/{id}/add-items", post(add_items_to_card))
}

async fn list_bookings(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<BookingFilterQuery>,
) -> JsonResult<ListResponse<BookingView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::list_bookings(&mut persistence, query, filter)?))
}

async fn list_active_bookings(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<BookingView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::list_active_bookings(&mut persistence, query)?))
}

async fn get_booking(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(booking_id): Path<i64>,
) -> JsonResult<BookingView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::get_booking(&mut persistence, booking_id)?))
}

async fn create_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<BookingRequest>,
) -> CreatedResult<BookingView> {
    info!(operator = %actor.id, guest_id = ?req.guest_id, room_id = ?req.room_id, "Creating booking");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(bookings::create_booking(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_id): Path<i64>,
    Payload(req): Payload<BookingRequest>,
) -> JsonResult<BookingView> {
    info!(operator = %actor.id, booking_id, "Updating booking");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::update_booking(
        &mut persistence,
        booking_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_id): Path<i64>,
    Payload(patch): Payload<BookingPatch>,
) -> JsonResult<BookingView> {
    info!(operator = %actor.id, booking_id, "Patching booking");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::patch_booking(
        &mut persistence,
        booking_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, booking_id, "Deleting booking");
    let mut persistence = app_state.persistence.lock().await;
    bookings::delete_booking(&mut persistence, booking_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn check_in_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_id): Path<i64>,
) -> JsonResult<BookingView> {
    info!(operator = %actor.id, booking_id, "Checking in");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::check_in_booking(
        &mut persistence,
        booking_id,
        app_state.now(),
    )?))
}

async fn check_out_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_id): Path<i64>,
) -> JsonResult<BookingView> {
    info!(operator = %actor.id, booking_id, "Checking out");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::check_out_booking(
        &mut persistence,
        booking_id,
        app_state.now(),
    )?))
}

async fn cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_id): Path<i64>,
) -> JsonResult<BookingView> {
    info!(operator = %actor.id, booking_id, "Cancelling booking");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::cancel_booking(
        &mut persistence,
        booking_id,
        app_state.now(),
    )?))
}

async fn list_booking_cards(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<BookingCardFilterQuery>,
) -> JsonResult<ListResponse<BookingCardView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::list_booking_cards(
        &mut persistence,
        query,
        filter,
    )?))
}

async fn get_booking_card(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(booking_card_id): Path<i64>,
) -> JsonResult<BookingCardView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::get_booking_card(
        &mut persistence,
        booking_card_id,
    )?))
}

async fn create_booking_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<BookingCardRequest>,
) -> CreatedResult<BookingCardView> {
    info!(
        operator = %actor.id,
        primary_guest_id = req.primary_guest_id,
        bookings = req.booking_ids.len(),
        "Creating booking card"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(bookings::create_booking_card(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_booking_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_card_id): Path<i64>,
    Payload(req): Payload<BookingCardRequest>,
) -> JsonResult<BookingCardView> {
    info!(operator = %actor.id, booking_card_id, "Updating booking card");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::update_booking_card(
        &mut persistence,
        booking_card_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_booking_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_card_id): Path<i64>,
    Payload(patch): Payload<BookingCardPatch>,
) -> JsonResult<BookingCardView> {
    info!(operator = %actor.id, booking_card_id, "Patching booking card");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::patch_booking_card(
        &mut persistence,
        booking_card_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_booking_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_card_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, booking_card_id, "Deleting booking card");
    let mut persistence = app_state.persistence.lock().await;
    bookings::delete_booking_card(&mut persistence, booking_card_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn recalculate_booking_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_card_id): Path<i64>,
) -> JsonResult<RecalculateResponse> {
    info!(operator = %actor.id, booking_card_id, "Recalculating booking card");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::recalculate_booking_card(
        &mut persistence,
        booking_card_id,
        app_state.now(),
    )?))
}

async fn add_booking_to_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_card_id): Path<i64>,
    Payload(req): Payload<AddBookingRequest>,
) -> JsonResult<BookingCardView> {
    info!(operator = %actor.id, booking_card_id, "Adding booking to card");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::add_booking_to_card(
        &mut persistence,
        booking_card_id,
        req,
        app_state.now(),
    )?))
}

async fn add_items_to_card(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(booking_card_id): Path<i64>,
    Payload(req): Payload<AddItemsRequest>,
) -> JsonResult<BookingCardView> {
    info!(
        operator = %actor.id,
        booking_card_id,
        goods = req.goods.len(),
        services = req.services.len(),
        "Adding items to card"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::add_items_to_card(
        &mut persistence,
        booking_card_id,
        &req,
        app_state.now(),
    )?))
}
