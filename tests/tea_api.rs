//! HTTP-level tests for the tea service over the in-memory store

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_api::config::ServiceKind;
use catalog_api::gateway::memory_app;
use catalog_api::gateway::types::PageLimits;

fn app() -> Router {
    memory_app(
        ServiceKind::Tea,
        PageLimits {
            default_limit: 100,
            max_limit: 100,
        },
    )
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            builder = builder.header("content-type", "application/json");
            Body::from(b)
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

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|b| b.to_string())).await
}

fn tea(name: &str, category: &str) -> Value {
    json!({ "name": name, "category": category, "origin": "Zhejiang" })
}

#[tokio::test]
async fn test_root_and_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to tea house");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tea");
    assert_eq!(body["storage"], "memory");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();
    let (status, created) = send(&app, "POST", "/teas", Some(tea("Dragon Well", "green"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["rating"], 0.0);
    assert_eq!(created["is_active"], true);
    assert!(created["created_at"].is_string());
    assert_eq!(created["created_at"], created["updated_at"]);

    let (status, fetched) = send(&app, "GET", "/teas/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let app = app();
    let (status, _) = send(&app, "POST", "/teas", Some(tea("Green Tea House", "green"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/teas", Some(tea("Green Tea House", "black"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["field"], "name");
    assert_eq!(body["message"], "Tea with this name already exists");

    let (_, list) = send(&app, "GET", "/teas", None).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_caller_assigned_id() {
    let app = app();
    let mut body = tea("Assam", "black");
    body["id"] = json!(42);
    let (status, created) = send(&app, "POST", "/teas", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 42);

    body["name"] = json!("Assam Second Flush");
    let (status, err) = send(&app, "POST", "/teas", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["field"], "id");

    let mut body = tea("Nilgiri", "black");
    body["id"] = json!(0);
    let (status, err) = send(&app, "POST", "/teas", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field"], "id");
}

#[tokio::test]
async fn test_caller_id_must_leave_room_for_next() {
    let app = app();
    let mut body = tea("Max Tea", "white");
    body["id"] = json!(i64::MAX);
    let (status, err) = send(&app, "POST", "/teas", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field"], "id");

    let mut body = tea("Max Tea", "white");
    body["id"] = json!(i64::MAX - 1);
    let (status, _) = send(&app, "POST", "/teas", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, created) = send(&app, "POST", "/teas", Some(tea("After Max", "white"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], i64::MAX);

    let (status, err) = send(&app, "POST", "/teas", Some(tea("No Room", "white"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["field"], "id");
}

#[tokio::test]
async fn test_fractional_seconds_rejected() {
    let app = app();
    let mut b = tea("Bai Hao", "white");
    b["opening_time"] = json!("09:00");
    b["closing_time"] = json!("09:00:00.5");
    let (status, body) = send(&app, "POST", "/teas", Some(b)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");

    let (_, list) = send(&app, "GET", "/teas", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_partial_update() {
    let app = app();
    let (_, created) = send(&app, "POST", "/teas", Some(tea("Sencha", "green"))).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/teas/1",
        Some(json!({ "rating": 4.5, "description": "Steamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rating"], 4.5);
    assert_eq!(updated["description"], "Steamed");
    assert_eq!(updated["name"], "Sencha");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let (status, cleared) = send(&app, "PUT", "/teas/1", Some(json!({ "description": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["description"].is_null());
}

#[tokio::test]
async fn test_missing_ids_are_404() {
    let app = app();
    let (status, body) = send(&app, "GET", "/teas/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tea not found");

    let (status, _) = send(&app, "PUT", "/teas/99", Some(json!({ "rating": 1.0 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/teas/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let app = app();
    send(&app, "POST", "/teas", Some(tea("Gyokuro", "green"))).await;
    let (status, body) = send(&app, "DELETE", "/teas/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", "/teas/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pagination() {
    let app = app();
    for i in 0..5 {
        send(&app, "POST", "/teas", Some(tea(&format!("Tea number {i}"), "green"))).await;
    }
    let (status, page) = send(&app, "GET", "/teas?skip=0&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 5);
    assert_eq!(page["skip"], 0);
    assert_eq!(page["limit"], 2);
    let ids: Vec<i64> = page["teas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let (_, page) = send(&app, "GET", "/teas", None).await;
    assert_eq!(page["limit"], 100);
    assert_eq!(page["teas"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_invalid_page_params() {
    let app = app();
    let (status, body) = send(&app, "GET", "/teas?skip=-1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "skip");

    let (status, _) = send(&app, "GET", "/teas?limit=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/teas?limit=101", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, "GET", "/teas?limit=ten", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_search_by_category() {
    let app = app();
    send(&app, "POST", "/teas", Some(tea("Tie Guan Yin", "Oolong"))).await;
    send(&app, "POST", "/teas", Some(tea("Da Hong Pao", "oolong"))).await;
    send(&app, "POST", "/teas", Some(tea("Lapsang", "black"))).await;

    let (status, page) = send(&app, "GET", "/teas/search?category=OOL", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);

    let (status, _) = send(&app, "GET", "/teas/search", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/teas/search?category=", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app();
    let (status, body) = send(&app, "POST", "/teas", Some(tea("ab", "green"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert_eq!(body["field"], "name");

    let mut b = tea("Keemun", "black");
    b["rating"] = json!(5.5);
    let (status, body) = send(&app, "POST", "/teas", Some(b)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "rating");

    let mut b = tea("Keemun", "black");
    b["opening_time"] = json!("09:00");
    b["closing_time"] = json!("09:00");
    let (status, body) = send(&app, "POST", "/teas", Some(b)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "closing_time");

    let (_, list) = send(&app, "GET", "/teas", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_update_hours_checked_against_stored_values() {
    let app = app();
    let mut b = tea("Pu-erh", "dark");
    b["opening_time"] = json!("10:00");
    b["closing_time"] = json!("18:00:00");
    let (_, created) = send(&app, "POST", "/teas", Some(b)).await;
    assert_eq!(created["opening_time"], "10:00:00");

    let (status, body) = send(&app, "PUT", "/teas/1", Some(json!({ "closing_time": "10:00" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "closing_time");
}

#[tokio::test]
async fn test_malformed_and_incomplete_bodies() {
    let app = app();
    let (status, body) = send_raw(&app, "POST", "/teas", Some("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_JSON");

    let (status, body) = send(&app, "POST", "/teas", Some(json!({ "name": "Only name" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");

    let (status, _) = send(&app, "GET", "/teas/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_openapi_served() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Tea House Catalog API");
}
