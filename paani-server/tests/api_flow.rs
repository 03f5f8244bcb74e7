//! End-to-end API tests against the full router, backed by a throwaway
//! SQLite file per test.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use paani_server::api;
use paani_server::{Config, ServerState};

/// Build the app on a fresh temporary database. The TempDir must stay alive
/// for the duration of the test.
async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let config = Config::with_overrides(db_path.to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    (api::build_app(state), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_customer(app: &Router, name: &str, price_per_can: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/customers",
        Some(json!({
            "name": name,
            "address": format!("{name} street 1"),
            "pricePerCan": price_per_can,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "customer create failed: {body}");
    body["id"].as_i64().unwrap()
}

async fn create_request(app: &Router, customer_id: i64, cans: i64, priority: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/delivery-requests",
        Some(json!({
            "customerId": customer_id,
            "cans": cans,
            "priority": priority,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "request create failed: {body}");
    body
}

async fn set_status(app: &Router, request_id: i64, status: &str) -> (StatusCode, Value) {
    send(
        app,
        "PUT",
        &format!("/api/delivery-requests/{request_id}/status"),
        Some(json!({ "status": status })),
    )
    .await
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn customer_create_list_update() {
    let (app, _dir) = test_app().await;

    let id = create_customer(&app, "Ayesha Khan", 120).await;

    let (status, body) = send(&app, "GET", "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Ayesha Khan");
    assert_eq!(list[0]["defaultCans"], 1);
    assert_eq!(list[0]["pricePerCan"], 120);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/customers/{id}"),
        Some(json!({ "phone": "0300-1234567", "pricePerCan": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "0300-1234567");
    assert_eq!(body["pricePerCan"], 150);
    // Untouched fields survive the partial update
    assert_eq!(body["name"], "Ayesha Khan");
}

#[tokio::test]
async fn customer_validation_errors() {
    let (app, _dir) = test_app().await;

    // Blank name
    let (status, body) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "   ", "address": "Somewhere", "pricePerCan": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"].as_str().unwrap().contains("Name"));

    // Price out of range
    let (status, _) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "Bilal", "address": "Somewhere", "pricePerCan": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Update of a missing customer
    let (status, _) = send(
        &app,
        "PUT",
        "/api/customers/999999",
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_requires_existing_customer() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/delivery-requests",
        Some(json!({ "customerId": 42, "cans": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["details"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn one_active_request_per_customer() {
    let (app, _dir) = test_app().await;
    let customer_id = create_customer(&app, "Hassan Raza", 100).await;

    let first = create_request(&app, customer_id, 2, "normal").await;
    assert_eq!(first["status"], "pending");
    assert_eq!(first["customerName"], "Hassan Raza");

    // Second active request is refused
    let (status, body) = send(
        &app,
        "POST",
        "/api/delivery-requests",
        Some(json!({ "customerId": customer_id, "cans": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Active request exists");

    // After the first is delivered, a new one is fine
    let id = first["id"].as_i64().unwrap();
    let (status, _) = set_status(&app, id, "processing").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = set_status(&app, id, "delivered").await;
    assert_eq!(status, StatusCode::OK);

    let again = create_request(&app, customer_id, 3, "urgent").await;
    assert_eq!(again["status"], "pending");
}

#[tokio::test]
async fn lifecycle_rejects_invalid_transitions() {
    let (app, _dir) = test_app().await;
    let customer_id = create_customer(&app, "Sana Tariq", 90).await;
    let request = create_request(&app, customer_id, 2, "normal").await;
    let id = request["id"].as_i64().unwrap();

    // pending cannot jump straight to delivered
    let (status, body) = set_status(&app, id, "delivered").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"].as_str().unwrap().contains("pending"));

    // The record is untouched by the failed advance
    let (_, list) = send(&app, "GET", "/api/delivery-requests", None).await;
    assert_eq!(list[0]["status"], "pending");
    assert!(list[0]["deliveredAt"].is_null());

    // Terminal states allow nothing out
    let (status, _) = set_status(&app, id, "cancelled").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = set_status(&app, id, "pending").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delivered_stamps_once_and_advance_is_idempotent() {
    let (app, _dir) = test_app().await;
    let customer_id = create_customer(&app, "Omar Siddiqui", 110).await;
    let request = create_request(&app, customer_id, 4, "normal").await;
    let id = request["id"].as_i64().unwrap();

    let (status, _) = set_status(&app, id, "processing").await;
    assert_eq!(status, StatusCode::OK);

    // Re-sending the current status is a quiet success
    let (status, body) = set_status(&app, id, "processing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processing");

    let (status, delivered) = set_status(&app, id, "delivered").await;
    assert_eq!(status, StatusCode::OK);
    let stamp = delivered["deliveredAt"].as_i64().unwrap();
    assert_eq!(delivered["completedAt"].as_i64().unwrap(), stamp);

    // Repeating delivered never re-stamps
    let (status, repeat) = set_status(&app, id, "delivered").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeat["deliveredAt"].as_i64().unwrap(), stamp);
}

#[tokio::test]
async fn cancel_endpoint_and_notification_feed() {
    let (app, _dir) = test_app().await;
    let customer_id = create_customer(&app, "Fatima Noor", 100).await;
    let request = create_request(&app, customer_id, 2, "normal").await;
    let id = request["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/delivery-requests/{id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, feed) = send(&app, "GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    let feed = feed.as_array().unwrap();
    // newCustomer + requestCreated + requestCancelled
    assert_eq!(feed.len(), 3);
    let cancelled = feed
        .iter()
        .find(|n| n["type"] == "requestCancelled")
        .expect("cancellation was not recorded");
    assert_eq!(cancelled["relatedDocId"].as_i64().unwrap(), id);
    assert_eq!(cancelled["isRead"], false);

    let note_id = cancelled["id"].as_i64().unwrap();
    let (status, marked) = send(
        &app,
        "PUT",
        &format!("/api/notifications/{note_id}/read"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["isRead"], true);

    let (status, body) = send(&app, "PUT", "/api/notifications/read-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["updated"].as_u64().unwrap() >= 1);

    let (_, feed) = send(&app, "GET", "/api/notifications", None).await;
    assert!(feed.as_array().unwrap().iter().all(|n| n["isRead"] == true));
}

#[tokio::test]
async fn manual_notification_append() {
    let (app, _dir) = test_app().await;

    // Untyped appends fall back to generic
    let (status, body) = send(
        &app,
        "POST",
        "/api/notifications",
        Some(json!({ "message": "Van maintenance on Friday" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "generic");
    assert_eq!(body["message"], "Van maintenance on Friday");
    assert_eq!(body["isRead"], false);

    // An explicit type is honored
    let (status, body) = send(
        &app,
        "POST",
        "/api/notifications",
        Some(json!({ "type": "newCustomer", "message": "Walk-in signup", "relatedDocId": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "newCustomer");
    assert_eq!(body["relatedDocId"], 42);

    // Blank message is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/api/notifications",
        Some(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, feed) = send(&app, "GET", "/api/notifications", None).await;
    assert_eq!(feed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn staff_queue_is_urgent_first_then_fifo() {
    let (app, _dir) = test_app().await;
    let a = create_customer(&app, "Customer A", 100).await;
    let b = create_customer(&app, "Customer B", 100).await;
    let c = create_customer(&app, "Customer C", 100).await;

    let first = create_request(&app, a, 1, "normal").await;
    let second = create_request(&app, b, 1, "urgent").await;
    let third = create_request(&app, c, 1, "normal").await;

    // Move one normal request out of the staff window
    let (status, _) = set_status(&app, first["id"].as_i64().unwrap(), "processing").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/delivery-requests?view=staff", None).await;
    assert_eq!(status, StatusCode::OK);
    let queue = body.as_array().unwrap();
    assert_eq!(queue.len(), 2, "processing requests are not staff work");
    assert_eq!(queue[0]["id"], second["id"]);
    assert_eq!(queue[1]["id"], third["id"]);
}

#[tokio::test]
async fn admin_view_groups_and_search() {
    let (app, _dir) = test_app().await;
    let a = create_customer(&app, "Zainab Ali", 100).await;
    let b = create_customer(&app, "Yusuf Malik", 100).await;

    let first = create_request(&app, a, 1, "normal").await;
    let _second = create_request(&app, b, 1, "urgent").await;

    // Deliver the first so the admin view has mixed groups
    let id = first["id"].as_i64().unwrap();
    set_status(&app, id, "processing").await;
    set_status(&app, id, "delivered").await;

    let (status, body) = send(&app, "GET", "/api/delivery-requests?view=admin", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    // Active work precedes delivered, regardless of age
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(list[1]["status"], "delivered");

    // Case-insensitive search across the snapshot fields
    let (status, body) = send(
        &app,
        "GET",
        "/api/delivery-requests?view=admin&q=zainab",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["customerName"], "Zainab Ali");

    // Unknown view parameter is rejected
    let (status, _) = send(&app, "GET", "/api/delivery-requests?view=boss", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_counts_todays_deliveries() {
    let (app, _dir) = test_app().await;
    let a = create_customer(&app, "Dashboard A", 100).await;
    let b = create_customer(&app, "Dashboard B", 100).await;

    let first = create_request(&app, a, 3, "normal").await;
    let _pending = create_request(&app, b, 2, "normal").await;

    let id = first["id"].as_i64().unwrap();
    set_status(&app, id, "processing").await;
    set_status(&app, id, "delivered").await;

    let (status, body) = send(&app, "GET", "/api/dashboard/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCustomers"], 2);
    assert_eq!(body["pendingRequests"], 1);
    assert_eq!(body["deliveriesToday"], 1);
    assert_eq!(body["totalCansToday"], 3);
}

#[tokio::test]
async fn customer_stats_and_active_check() {
    let (app, _dir) = test_app().await;
    let customer_id = create_customer(&app, "Stats Customer", 50).await;

    // Deliver two requests of 2 and 3 cans
    for cans in [2, 3] {
        let request = create_request(&app, customer_id, cans, "normal").await;
        let id = request["id"].as_i64().unwrap();
        set_status(&app, id, "processing").await;
        set_status(&app, id, "delivered").await;
    }

    let (status, stats) = send(
        &app,
        "GET",
        &format!("/api/customers/{customer_id}/stats"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalDeliveries"], 2);
    assert_eq!(stats["totalCansReceived"], 5);
    assert_eq!(stats["totalPrice"], 250);
    assert_eq!(stats["pricePerCan"], 50);

    // No active request right now
    let (status, check) = send(
        &app,
        "GET",
        &format!("/api/customers/{customer_id}/active-requests"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["hasActiveRequests"], false);
    assert_eq!(check["activeRequestsCount"], 0);

    let open = create_request(&app, customer_id, 1, "urgent").await;
    let (_, check) = send(
        &app,
        "GET",
        &format!("/api/customers/{customer_id}/active-requests"),
        None,
    )
    .await;
    assert_eq!(check["hasActiveRequests"], true);
    assert_eq!(check["activeRequestsCount"], 1);
    assert_eq!(check["activeRequests"][0]["id"], open["id"]);

    // Stats for a missing customer
    let (status, _) = send(&app, "GET", "/api/customers/999999/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn legacy_text_customer_id_rows_count_toward_stats_and_active_check() {
    // Rows imported from the legacy system hold customer_id as TEXT; the
    // column affinity keeps them that way. Lookups must match both forms.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let config = Config::with_overrides(db_path.to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    let app = api::build_app(state.clone());

    let customer_id = create_customer(&app, "Legacy Customer", 80).await;

    let insert = "INSERT INTO delivery_request (id, customer_id, customer_name, address, cans, priority, status, requested_at, delivered_at, completed_at, created_at, updated_at) VALUES (?1, CAST(?2 AS TEXT), ?3, ?4, ?5, 'normal', ?6, ?7, ?8, ?8, ?7, ?7)";
    let now = chrono::Utc::now().timestamp_millis();
    // One delivered and one still-pending legacy row
    sqlx::query(insert)
        .bind(1_001_i64)
        .bind(customer_id)
        .bind("Legacy Customer")
        .bind("Legacy street 1")
        .bind(4_i64)
        .bind("delivered")
        .bind(now - 60_000)
        .bind(Some(now - 30_000))
        .execute(state.pool())
        .await
        .unwrap();
    sqlx::query(insert)
        .bind(1_002_i64)
        .bind(customer_id)
        .bind("Legacy Customer")
        .bind("Legacy street 1")
        .bind(2_i64)
        .bind("pending")
        .bind(now)
        .bind(None::<i64>)
        .execute(state.pool())
        .await
        .unwrap();

    let (status, stats) = send(
        &app,
        "GET",
        &format!("/api/customers/{customer_id}/stats"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalDeliveries"], 1);
    assert_eq!(stats["totalCansReceived"], 4);
    assert_eq!(stats["totalPrice"], 320);

    let (status, check) = send(
        &app,
        "GET",
        &format!("/api/customers/{customer_id}/active-requests"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["hasActiveRequests"], true);
    assert_eq!(check["activeRequestsCount"], 1);
    assert_eq!(check["activeRequests"][0]["customerId"].as_i64().unwrap(), customer_id);

    // The active legacy row also blocks new requests for this customer
    let (status, _) = send(
        &app,
        "POST",
        "/api/delivery-requests",
        Some(json!({ "customerId": customer_id, "cans": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn request_partial_update_leaves_status_alone() {
    let (app, _dir) = test_app().await;
    let customer_id = create_customer(&app, "Update Customer", 100).await;
    let request = create_request(&app, customer_id, 2, "normal").await;
    let id = request["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/delivery-requests/{id}"),
        Some(json!({ "cans": 5, "internalNotes": "leave at gate" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cans"], 5);
    assert_eq!(body["internalNotes"], "leave at gate");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["requestedAt"], request["requestedAt"]);

    // Invalid can count is rejected
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/delivery-requests/{id}"),
        Some(json!({ "cans": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
