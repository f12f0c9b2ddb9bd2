// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use innkeep_domain::HotelClock;
use innkeep_persistence::SqlitePersistence;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::error::ErrorResponse;
use crate::routes::HealthResponse;
use crate::{AppState, build_router};

fn create_test_app() -> Router {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState::new(persistence, HotelClock::utc()))
}

/// Sends one request and returns the status and the decoded JSON body.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Creates the first admin and returns a session token for it.
async fn bootstrap_admin(app: &Router) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/auth/bootstrap",
        None,
        Some(json!({
            "login_name": "frontdesk",
            "display_name": "Front Desk",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, "frontdesk", "correct horse battery").await
}

async fn login(app: &Router, login_name: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "login_name": login_name, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["session_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_and_discovery_need_no_session() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.timezone, "UTC");

    let (status, body) = send(&app, "GET", "/api/v1/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guests"], "/api/v1/guests");
    assert_eq!(body["card-payments"], "/api/v1/card-payments");
}

#[tokio::test]
async fn test_resources_require_a_session() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/api/v1/guests", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert!(error.error);
    assert!(error.message.contains("Authorization"));

    let (status, _) = send(&app, "GET", "/api/v1/guests", Some("session_bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bootstrap_login_whoami_logout() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/api/v1/auth/bootstrap-status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["needs_bootstrap"], true);

    let token: String = bootstrap_admin(&app).await;

    let (status, body) = send(&app, "GET", "/api/v1/auth/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login_name"], "FRONTDESK");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["role"], "Admin");

    // A second bootstrap is refused once an operator exists.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/bootstrap",
        None,
        Some(json!({
            "login_name": "intruder",
            "display_name": "Intruder",
            "password": "whatever password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["bootstrap_once"].is_string());

    let (status, _) = send(&app, "POST", "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/v1/auth/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app: Router = create_test_app();
    bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "login_name": "frontdesk", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_staff_cannot_manage_operators() {
    let app: Router = create_test_app();
    let admin: String = bootstrap_admin(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/operators",
        Some(&admin),
        Some(json!({
            "login_name": "night",
            "display_name": "Night Shift",
            "role": "Staff",
            "password": "staff password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let staff: String = login(&app, "night", "staff password").await;
    let (status, body) = send(&app, "GET", "/api/v1/operators", Some(&staff), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("Admin"));

    // Staff can still work with the back office itself.
    let (status, body) = send(&app, "GET", "/api/v1/guests", Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_create_validate_and_delete_job_title() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/job-titles",
        Some(&token),
        Some(json!({ "title": "Housekeeper", "pay_per_hour": 900 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let job_title_id: i64 = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/job-titles",
        Some(&token),
        Some(json!({ "title": "Volunteer", "pay_per_hour": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert!(error.fields.contains_key("pay_per_hour"));

    let (status, body) = send(&app, "GET", "/api/v1/job-titles", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let uri: String = format!("/api/v1/job-titles/{job_title_id}");
    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/job-titles",
        Some(&token),
        Some(json!({ "title": "Porter" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["non_field_errors"].is_string());
}

#[tokio::test]
async fn test_shift_actions_accept_an_empty_body() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (_, job_title) = send(
        &app,
        "POST",
        "/api/v1/job-titles",
        Some(&token),
        Some(json!({ "title": "Porter", "pay_per_hour": 1200 })),
    )
    .await;
    let (status, worker) = send(
        &app,
        "POST",
        "/api/v1/workers",
        Some(&token),
        Some(json!({
            "name": "Aliya",
            "main_job_title_id": job_title["id"],
            "telegram_id": 4242,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let worker_id: i64 = worker["id"].as_i64().unwrap();

    let start_uri: String = format!("/api/v1/workers/{worker_id}/start-shift");
    let (status, report) = send(&app, "POST", &start_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(report["finish"].is_null());

    let (status, body) = send(&app, "POST", &start_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["one_open_shift_per_worker"].is_string());

    let (status, body) = send(&app, "GET", "/api/v1/workers/working", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let finish_uri: String = format!("/api/v1/workers/{worker_id}/finish-shift");
    let (status, report) = send(&app, "POST", &finish_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(report["finish"].is_string());
}

#[tokio::test]
async fn test_catalog_collections_are_separate() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (status, item) = send(
        &app,
        "POST",
        "/api/v1/goods",
        Some(&token),
        Some(json!({ "name": "Water", "price": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["kind"], "goods");
    let item_id: i64 = item["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/services/{item_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, stats) = send(&app, "GET", "/api/v1/goods/statistics", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["total_price"], 500);
}

#[tokio::test]
async fn test_unknown_payment_order_is_not_found() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/payment-orders/77/add-cash-payment",
        Some(&token),
        Some(json!({ "payment_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_deleting_room_type_in_use_is_conflict() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/room-types",
        Some(&token),
        Some(json!({ "title": "Standard", "price": 10_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let room_type_id: i64 = body["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/rooms",
        Some(&token),
        Some(json!({ "number": 101, "floor": 1, "room_type_ids": [room_type_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri: String = format!("/api/v1/room-types/{room_type_id}");
    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert!(error.error);

    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_expiring_soon_days_out_of_range_is_bad_request() {
    let app: Router = create_test_app();
    let token: String = bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/documents/expiring-soon?days=4611686018427387903",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert!(error.fields.contains_key("days"));

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/documents/expiring-soon?days=36500",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}
