//! HTTP-level tests for the restaurant service over the in-memory store

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_api::config::{AppConfig, ServiceKind};
use catalog_api::gateway::types::PageLimits;
use catalog_api::gateway::{app_from_config, memory_app};

fn app() -> Router {
    memory_app(
        ServiceKind::Restaurant,
        PageLimits {
            default_limit: 10,
            max_limit: 100,
        },
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            builder = builder.header("content-type", "application/json");
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn restaurant(name: &str, phone: &str, cuisine: &str) -> Value {
    json!({
        "name": name,
        "cuisine_type": cuisine,
        "address": "221B Baker Street",
        "phone_number": phone,
        "opening_time": "11:00",
        "closing_time": "23:00"
    })
}

#[tokio::test]
async fn test_create_and_get() {
    let app = app();
    let (status, created) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Trattoria", "555-123-4567", "Italian")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["phone_number"], "555-123-4567");
    assert_eq!(created["closing_time"], "23:00:00");

    let (status, fetched) = send(&app, "GET", "/restaurants/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["service"], "restaurant");
}

#[tokio::test]
async fn test_phone_validation() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Long Digits", "123-456-78901", "Fusion")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Too Short", "12345", "Fusion")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "phone_number");
}

#[tokio::test]
async fn test_duplicate_name_and_phone() {
    let app = app();
    send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Trattoria", "555-123-4567", "Italian")),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Trattoria", "555-000-0000", "Italian")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "name");

    let (status, body) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Osteria", "555-123-4567", "Italian")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "phone_number");
    assert_eq!(body["message"], "Restaurant with this phone_number already exists");
}

#[tokio::test]
async fn test_phone_uniqueness_compares_stored_text() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Dashes", "555-123-4567", "Deli")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, created) = send(
        &app,
        "POST",
        "/restaurants",
        Some(restaurant("Digits", "5551234567", "Deli")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["phone_number"], "5551234567");
}

#[tokio::test]
async fn test_update_conflict_and_self_rename() {
    let app = app();
    send(&app, "POST", "/restaurants", Some(restaurant("Alpha", "5550000001", "Thai"))).await;
    send(&app, "POST", "/restaurants", Some(restaurant("Bravo", "5550000002", "Thai"))).await;

    let (status, _) = send(&app, "PUT", "/restaurants/2", Some(json!({ "phone_number": "5550000001" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "PUT", "/restaurants/2", Some(json!({ "name": "Bravo" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone_number"], "5550000002");
}

#[tokio::test]
async fn test_same_opening_and_closing_rejected() {
    let app = app();
    let mut body = restaurant("Clockwork", "5551112222", "Diner");
    body["opening_time"] = json!("09:00");
    body["closing_time"] = json!("09:00");
    let (status, err) = send(&app, "POST", "/restaurants", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field"], "closing_time");
}

#[tokio::test]
async fn test_overnight_hours_allowed_by_default() {
    let app = app();
    let mut body = restaurant("Night Owl", "5551113333", "Diner");
    body["opening_time"] = json!("20:00");
    body["closing_time"] = json!("02:00");
    let (status, _) = send(&app, "POST", "/restaurants", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_defaults_and_active_filter() {
    let app = app();
    for i in 0..12 {
        send(
            &app,
            "POST",
            "/restaurants",
            Some(restaurant(&format!("Place {i:02}"), &format!("55500000{i:02}"), "Cafe")),
        )
        .await;
    }
    send(&app, "PUT", "/restaurants/3", Some(json!({ "is_active": false }))).await;

    let (status, page) = send(&app, "GET", "/restaurants", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 12);
    assert_eq!(page["limit"], 10);
    assert_eq!(page["restaurants"].as_array().unwrap().len(), 10);

    let (_, active) = send(&app, "GET", "/restaurants/active?limit=100", None).await;
    assert_eq!(active["total"], 11);
    assert!(
        active["restaurants"]
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["is_active"] == true)
    );
}

#[tokio::test]
async fn test_search_by_cuisine() {
    let app = app();
    send(&app, "POST", "/restaurants", Some(restaurant("Sakura", "5552220001", "Japanese"))).await;
    send(&app, "POST", "/restaurants", Some(restaurant("Roma", "5552220002", "Italian"))).await;

    let (status, page) = send(&app, "GET", "/restaurants/search?cuisine=japan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["restaurants"][0]["name"], "Sakura");

    let (status, page) = send(&app, "GET", "/restaurants/search?cuisine=50%25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_delete_missing_leaves_store_unchanged() {
    let app = app();
    send(&app, "POST", "/restaurants", Some(restaurant("Keeper", "5553330000", "Bistro"))).await;
    let (status, _) = send(&app, "DELETE", "/restaurants/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, page) = send(&app, "GET", "/restaurants", None).await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn test_app_from_memory_config() {
    let config: AppConfig = serde_yaml::from_str(
        r#"
log_level: info
log_dir: ./logs
log_file: test.log
use_json: false
rotation: never
service: restaurant
gateway:
  host: 127.0.0.1
  port: 0
validation:
  closing_time_policy: strictly_after
"#,
    )
    .unwrap();
    let app = app_from_config(&config).await.unwrap();

    let mut body = restaurant("Night Owl", "5551113333", "Diner");
    body["opening_time"] = json!("20:00");
    body["closing_time"] = json!("02:00");
    let (status, err) = send(&app, "POST", "/restaurants", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field"], "closing_time");

    let (_, page) = send(&app, "GET", "/restaurants", None).await;
    assert_eq!(page["limit"], 10);
}
