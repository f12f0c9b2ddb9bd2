// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, sessions and operator accounts.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::HeaderMap,
    routing::{get, post},
};
use innkeep_api::handlers::auth;
use innkeep_api::request_response::auth::{
    BootstrapRequest, BootstrapStatusView, LoginRequest, OperatorRequest, OperatorView,
    SessionView,
};
use innkeep_api::{ApiError, ListResponse, MessageResponse};
use tracing::info;

use super::{CreatedResult, JsonResult, created};
use crate::AppState;
use crate::extract::Payload;
use crate::session::{SessionOperator, bearer_token};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route("/auth/bootstrap-status", get(handle_bootstrap_status))
        .route("/auth/bootstrap", post(handle_bootstrap))
        .route("/operators", get(handle_list_operators).post(handle_create_operator))
        .route("/operators/{id}/disable", post(handle_disable_operator))
        .route("/operators/{id}/enable", post(handle_enable_operator))
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Payload(req): Payload<LoginRequest>,
) -> JsonResult<SessionView> {
    info!(login_name = %req.login_name, "Handling login request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::login(&mut persistence, &req, app_state.now())?))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    headers: HeaderMap,
) -> JsonResult<MessageResponse> {
    let token: &str = bearer_token(&headers).map_err(|_| {
        ApiError::AuthenticationFailed {
            reason: String::from("Missing session token"),
        }
    })?;
    info!(operator = %actor.id, "Handling logout request");
    let mut persistence = app_state.persistence.lock().await;
    auth::logout(&mut persistence, token)?;
    Ok(Json(MessageResponse {
        message: String::from("Logged out"),
    }))
}

async fn handle_whoami(SessionOperator(_, operator): SessionOperator) -> Json<OperatorView> {
    Json(auth::whoami(&operator))
}

async fn handle_bootstrap_status(
    AxumState(app_state): AxumState<AppState>,
) -> JsonResult<BootstrapStatusView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::get_bootstrap_status(&mut persistence)?))
}

async fn handle_bootstrap(
    AxumState(app_state): AxumState<AppState>,
    Payload(req): Payload<BootstrapRequest>,
) -> CreatedResult<OperatorView> {
    info!(login_name = %req.login_name, "Handling bootstrap request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(auth::create_first_admin(&mut persistence, req)?))
}

async fn handle_list_operators(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
) -> JsonResult<ListResponse<OperatorView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::list_operators(&mut persistence, &actor)?))
}

async fn handle_create_operator(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<OperatorRequest>,
) -> CreatedResult<OperatorView> {
    info!(operator = %actor.id, login_name = %req.login_name, "Handling create_operator request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(auth::create_operator(&mut persistence, req, &actor)?))
}

async fn handle_disable_operator(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(operator_id): Path<i64>,
) -> JsonResult<OperatorView> {
    info!(operator = %actor.id, operator_id, "Handling disable_operator request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::disable_operator(
        &mut persistence,
        operator_id,
        &actor,
        app_state.now(),
    )?))
}

async fn handle_enable_operator(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(operator_id): Path<i64>,
) -> JsonResult<OperatorView> {
    info!(operator = %actor.id, operator_id, "Handling enable_operator request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::enable_operator(
        &mut persistence,
        operator_id,
        &actor,
        app_state.now(),
    )?))
}
