use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use database::InMemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{AppState, build_router};

fn app() -> Router {
    build_router(AppState::new(Arc::new(InMemoryStore::new())), 1024 * 1024)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn ann_lee() -> Value {
    json!({
        "name": "Ann Lee",
        "dateOfBirth": "1990-05-01",
        "memberNumber": 1001,
        "interests": "gym"
    })
}

#[tokio::test]
async fn create_get_delete_round_trip() {
    let app = app();

    let (status, created) = send_json(&app, Method::POST, "/customer", Some(ann_lee())).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().expect("id assigned").to_string();
    for field in ["name", "dateOfBirth", "memberNumber", "interests"] {
        assert_eq!(created[field], ann_lee()[field], "field {field}");
    }

    let (status, fetched) = send_json(&app, Method::GET, &format!("/customer/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, deleted) = send_json(&app, Method::DELETE, &format!("/customer/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, body) = send(&app, Method::GET, &format!("/customer/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Customer not found");
}

#[tokio::test]
async fn list_returns_every_created_record() {
    let app = app();
    let mut ids = Vec::new();
    for n in 0..3 {
        let mut body = ann_lee();
        body["memberNumber"] = json!(2000 + n);
        let (_, created) = send_json(&app, Method::POST, "/customer", Some(body)).await;
        ids.push(created["id"].clone());
    }

    let (status, listed) = send_json(&app, Method::GET, "/customer", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed_ids: Vec<Value> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].clone())
        .collect();
    assert_eq!(listed_ids.len(), 3);
    for id in &ids {
        assert!(listed_ids.contains(id));
    }
}

#[tokio::test]
async fn put_and_patch_change_only_submitted_fields() {
    let app = app();
    let (_, created) = send_json(&app, Method::POST, "/customer", Some(ann_lee())).await;
    let id = created["id"].clone();

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/customer",
        Some(json!({ "id": id, "memberNumber": "1002" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["memberNumber"], 1002);
    assert_eq!(updated["name"], "Ann Lee");
    assert_eq!(updated["interests"], "gym");

    let (status, patched) = send_json(
        &app,
        Method::PATCH,
        "/customer",
        Some(json!({ "_id": id, "name": "Ann Park", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["id"], id);
    assert_eq!(patched["name"], "Ann Park");
    assert_eq!(patched["memberNumber"], 1002);
    assert!(patched.get("role").is_none());
}

#[tokio::test]
async fn id_scoped_operations_signal_not_found() {
    let app = app();
    let missing = "6f1c2a7e-3b0d-4c43-9a5e-0f8f0b3f2d11";

    let (status, _) = send(&app, Method::GET, &format!("/customer/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/customer/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/customer",
        Some(json!({ "id": missing, "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_errors_name_the_field() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/customer",
        Some(json!({ "name": "", "dateOfBirth": "1990-05-01", "memberNumber": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");

    let (status, body) = send_json(&app, Method::PUT, "/customer", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");

    let (status, body) = send_json(&app, Method::GET, "/customer/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");

    let (_, listed) = send_json(&app, Method::GET, "/customer", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn unparseable_body_values_are_validation_errors() {
    let app = app();
    let (_, created) = send_json(&app, Method::POST, "/customer", Some(ann_lee())).await;

    let cases = [
        (Method::POST, json!({ "dateOfBirth": "05/01/1990" }), "dateOfBirth"),
        (Method::POST, json!({ "memberNumber": "abc" }), "memberNumber"),
        (Method::PUT, json!({ "id": "not-a-uuid" }), "id"),
        (Method::PATCH, json!({ "_id": "not-a-uuid" }), "id"),
        (Method::PUT, json!({ "id": created["id"], "dateOfBirth": "yesterday" }), "dateOfBirth"),
        (Method::PATCH, json!({ "id": created["id"], "memberNumber": "12a" }), "memberNumber"),
    ];

    for (method, overrides, field) in cases {
        let mut body = if method == Method::POST { ann_lee() } else { json!({ "name": "Ann Park" }) };
        for (key, value) in overrides.as_object().unwrap() {
            body[key] = value.clone();
        }

        let (status, response) = send_json(&app, method.clone(), "/customer", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {field}");
        assert_eq!(response["field"], field, "{method} {field}");
    }

    let (_, listed) = send_json(&app, Method::GET, "/customer", None).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn health_check_answers_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
