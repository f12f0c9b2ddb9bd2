// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card, cash and bank payments, and payment orders.

use axum::{
    Extension, Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::{get, post},
};
use innkeep_api::handlers::payments;
use innkeep_api::request_response::payments::{
    AttachPaymentRequest, ChannelStatisticsView, CreatePaymentOrderRequest, PaymentFilterQuery,
    PaymentOrderFilterQuery, PaymentOrderPatch, PaymentOrderView, PaymentPatch, PaymentRequest,
    PaymentView, UpdatePaymentOrderRequest,
};
use innkeep_api::{ListQuery, ListResponse};
use innkeep_domain::PaymentChannel;
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    let orders: Router<AppState> = Router::new()
        .route(
            "/payment-orders",
            get(list_payment_orders).post(create_payment_order),
        )
        .route(
            "/payment-orders/{id}",
            get(get_payment_order)
                .put(update_payment_order)
                .patch(patch_payment_order)
                .delete(delete_payment_order),
        );

    [PaymentChannel::Card, PaymentChannel::Cash, PaymentChannel::Bank]
        .into_iter()
        .fold(orders, |router, channel| router.merge(channel_routes(channel)))
}

/// Payment collection and attach action for one channel.
fn channel_routes(channel: PaymentChannel) -> Router<AppState> {
    let name: &str = channel.as_str();
    Router::new()
        .route(
            &format!("/{name}-payments"),
            get(list_payments).post(create_payment),
        )
        .route(&format!("/{name}-payments/statistics"), get(payment_statistics))
        .route(
            &format!("/{name}-payments/{{id}}"),
            get(get_payment)
                .put(update_payment)
                .patch(patch_payment)
                .delete(delete_payment),
        )
        .route(
            &format!("/payment-orders/{{id}}/add-{name}-payment"),
            post(attach_payment),
        )
        .layer(Extension(channel))
}

async fn list_payments(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<PaymentFilterQuery>,
) -> JsonResult<ListResponse<PaymentView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::list_payments(
        &mut persistence,
        channel,
        query,
        filter,
        app_state.now(),
    )?))
}

async fn payment_statistics(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    _: SessionOperator,
    Params(filter): Params<PaymentFilterQuery>,
) -> JsonResult<ChannelStatisticsView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::payment_statistics(
        &mut persistence,
        channel,
        filter,
        app_state.now(),
    )?))
}

async fn get_payment(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    _: SessionOperator,
    Path(payment_id): Path<i64>,
) -> JsonResult<PaymentView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::get_payment(
        &mut persistence,
        channel,
        payment_id,
    )?))
}

async fn create_payment(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<PaymentRequest>,
) -> CreatedResult<PaymentView> {
    info!(
        operator = %actor.id,
        channel = channel.as_str(),
        booking_card_id = req.booking_card_id,
        amount = req.amount,
        "Recording payment"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(payments::create_payment(
        &mut persistence,
        channel,
        req,
        app_state.now(),
    )?))
}

async fn update_payment(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_id): Path<i64>,
    Payload(req): Payload<PaymentRequest>,
) -> JsonResult<PaymentView> {
    info!(operator = %actor.id, channel = channel.as_str(), payment_id, "Updating payment");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::update_payment(
        &mut persistence,
        channel,
        payment_id,
        req,
        app_state.now(),
    )?))
}

async fn patch_payment(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_id): Path<i64>,
    Payload(patch): Payload<PaymentPatch>,
) -> JsonResult<PaymentView> {
    info!(operator = %actor.id, channel = channel.as_str(), payment_id, "Patching payment");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::patch_payment(
        &mut persistence,
        channel,
        payment_id,
        patch,
        app_state.now(),
    )?))
}

async fn delete_payment(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, channel = channel.as_str(), payment_id, "Deleting payment");
    let mut persistence = app_state.persistence.lock().await;
    payments::delete_payment(&mut persistence, channel, payment_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn attach_payment(
    AxumState(app_state): AxumState<AppState>,
    Extension(channel): Extension<PaymentChannel>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_order_id): Path<i64>,
    Payload(req): Payload<AttachPaymentRequest>,
) -> JsonResult<PaymentOrderView> {
    info!(
        operator = %actor.id,
        channel = channel.as_str(),
        payment_order_id,
        payment_id = req.payment_id,
        "Attaching payment to order"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::attach_payment(
        &mut persistence,
        payment_order_id,
        channel,
        req,
    )?))
}

async fn list_payment_orders(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<PaymentOrderFilterQuery>,
) -> JsonResult<ListResponse<PaymentOrderView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::list_payment_orders(
        &mut persistence,
        query,
        filter,
    )?))
}

async fn get_payment_order(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(payment_order_id): Path<i64>,
) -> JsonResult<PaymentOrderView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::get_payment_order(
        &mut persistence,
        payment_order_id,
    )?))
}

async fn create_payment_order(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<CreatePaymentOrderRequest>,
) -> CreatedResult<PaymentOrderView> {
    info!(operator = %actor.id, booking_card_id = req.booking_card_id, "Creating payment order");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(payments::create_payment_order(
        &mut persistence,
        req,
        app_state.now(),
    )?))
}

async fn update_payment_order(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_order_id): Path<i64>,
    Payload(req): Payload<UpdatePaymentOrderRequest>,
) -> JsonResult<PaymentOrderView> {
    info!(operator = %actor.id, payment_order_id, "Updating payment order");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::update_payment_order(
        &mut persistence,
        payment_order_id,
        req,
    )?))
}

async fn patch_payment_order(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_order_id): Path<i64>,
    Payload(patch): Payload<PaymentOrderPatch>,
) -> JsonResult<PaymentOrderView> {
    info!(operator = %actor.id, payment_order_id, "Patching payment order");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(payments::patch_payment_order(
        &mut persistence,
        payment_order_id,
        patch,
    )?))
}

async fn delete_payment_order(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(payment_order_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, payment_order_id, "Deleting payment order");
    let mut persistence = app_state.persistence.lock().await;
    payments::delete_payment_order(&mut persistence, payment_order_id)?;
    Ok(StatusCode::NO_CONTENT)
}
