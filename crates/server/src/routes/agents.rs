// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::get,
};
use innkeep_api::handlers::{agents, bookings};
use innkeep_api::request_response::agents::{AgentFilterQuery, AgentPatch, AgentRequest, AgentView};
use innkeep_api::request_response::bookings::BookingView;
use innkeep_api::{ListQuery, ListResponse};
use tracing::info;

use super::{CreatedResult, DeletedResult, JsonResult, created};
use crate::AppState;
use crate::extract::{Params, Payload};
use crate::session::SessionOperator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(handle_list).post(handle_create))
        .route(
            "/agents/{id}",
            get(handle_get)
                .put(handle_update)
                .patch(handle_patch)
                .delete(handle_delete),
        )
        .route("/agents/{id}/bookings", get(handle_bookings))
}

async fn handle_list(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Params(query): Params<ListQuery>,
    Params(filter): Params<AgentFilterQuery>,
) -> JsonResult<ListResponse<AgentView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(agents::list_agents(&mut persistence, query, filter)?))
}

async fn handle_get(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(agent_id): Path<i64>,
) -> JsonResult<AgentView> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(agents::get_agent(&mut persistence, agent_id)?))
}

async fn handle_create(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Payload(req): Payload<AgentRequest>,
) -> CreatedResult<AgentView> {
    info!(operator = %actor.id, short_title = %req.short_title, "Creating agent");
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(agents::create_agent(&mut persistence, req, app_state.now())?))
}

async fn handle_update(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(agent_id): Path<i64>,
    Payload(req): Payload<AgentRequest>,
) -> JsonResult<AgentView> {
    info!(operator = %actor.id, agent_id, "Updating agent");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(agents::update_agent(
        &mut persistence,
        agent_id,
        req,
        app_state.now(),
    )?))
}

async fn handle_patch(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(agent_id): Path<i64>,
    Payload(patch): Payload<AgentPatch>,
) -> JsonResult<AgentView> {
    info!(operator = %actor.id, agent_id, "Patching agent");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(agents::patch_agent(
        &mut persistence,
        agent_id,
        patch,
        app_state.now(),
    )?))
}

async fn handle_delete(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(agent_id): Path<i64>,
) -> DeletedResult {
    info!(operator = %actor.id, agent_id, "Deleting agent");
    let mut persistence = app_state.persistence.lock().await;
    agents::delete_agent(&mut persistence, agent_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_bookings(
    AxumState(app_state): AxumState<AppState>,
    _: SessionOperator,
    Path(agent_id): Path<i64>,
    Params(query): Params<ListQuery>,
) -> JsonResult<ListResponse<BookingView>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bookings::list_agent_bookings(
        &mut persistence,
        agent_id,
        query,
    )?))
}
