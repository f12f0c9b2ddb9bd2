// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router assembly.
//!
//! Each submodule owns the routes of one resource family. Handlers lock
//! the persistence adapter, call one `innkeep_api` handler and serialize
//! the result; creates answer 201 and deletes 204.

mod agents;
mod auth;
mod bookings;
mod catalog;
mod documents;
mod guests;
mod inventory;
mod payments;
mod workforce;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::error::HttpError;

/// Prefix for every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Collections listed by the discovery endpoint.
const COLLECTIONS: &[&str] = &[
    "agents",
    "bank-payments",
    "booking-cards",
    "bookings",
    "card-payments",
    "cash-payments",
    "documents",
    "goods",
    "guests",
    "job-titles",
    "nationalities",
    "payment-orders",
    "reports",
    "room-conditions",
    "room-types",
    "rooms",
    "services",
    "workers",
];

type JsonResult<T> = Result<Json<T>, HttpError>;
type CreatedResult<T> = Result<(StatusCode, Json<T>), HttpError>;
type DeletedResult = Result<StatusCode, HttpError>;

const fn created<T>(value: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(value))
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timezone: String,
}

async fn handle_discovery() -> Json<BTreeMap<String, String>> {
    Json(
        COLLECTIONS
            .iter()
            .map(|name| ((*name).to_string(), format!("{API_PREFIX}/{name}")))
            .collect(),
    )
}

async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        timezone: app_state.clock.timezone_name().to_string(),
    })
}

/// Builds the application router.
pub fn build_router(app_state: AppState) -> Router {
    let resources: Router<AppState> = Router::new()
        .route("/health", get(handle_health))
        .merge(auth::routes())
        .merge(agents::routes())
        .merge(workforce::routes())
        .merge(documents::routes())
        .merge(guests::routes())
        .merge(inventory::routes())
        .merge(bookings::routes())
        .merge(catalog::routes())
        .merge(payments::routes());

    Router::new()
        .route(API_PREFIX, get(handle_discovery))
        .route(&format!("{API_PREFIX}/"), get(handle_discovery))
        .nest(API_PREFIX, resources)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
