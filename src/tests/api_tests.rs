use super::create_test_service;
use crate::api::router;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(create_test_service()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
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

async fn create_user(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/users", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_group(app: &Router, users: &[&str]) -> String {
    let (status, body) = send(app, "POST", "/groups", Some(json!({ "name": "Trip", "users": users }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_home_counts_calls() {
    let app = app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calls"], 1);

    let (_, body) = send(&app, "GET", "/", None).await;
    assert_eq!(body["calls"], 2);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, "GET", "/groups/not-an-id", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id must be a valid id");
}

#[tokio::test]
async fn test_missing_group_is_not_found() {
    let app = app();
    let uri = format!("/groups/{}/balances", uuid::Uuid::new_v4());

    let (status, body) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_empty_user_name_is_rejected() {
    let app = app();

    let (status, body) = send(&app, "POST", "/users", Some(json!({ "name": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field \"name\" must be non-empty");
}

#[tokio::test]
async fn test_transaction_flow_updates_balances() {
    let app = app();
    let alice = create_user(&app, "Alice").await;
    let bob = create_user(&app, "Bob").await;
    let group = create_group(&app, &[&alice, &bob]).await;

    let (status, created) = send(
        &app,
        "POST",
        &format!("/groups/{}/transactions", group),
        Some(json!({
            "paidBy": alice,
            "paidFor": [
                { "user": alice, "weight": 1 },
                { "user": bob, "weight": 2 }
            ],
            "amount": 100,
            "date": "2024-06-01T12:00:00Z",
            "category": "food",
            "title": "Dinner"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["group"], group.as_str());
    assert_eq!(created["paidFor"][0]["computedPrice"], 34);
    assert_eq!(created["paidFor"][1]["computedPrice"], 66);

    let (status, balances) = send(&app, "GET", &format!("/groups/{}/balances", group), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balances[alice.as_str()]["positiveAmount"], 100);
    assert_eq!(balances[alice.as_str()]["negativeAmount"], 34);
    assert_eq!(balances[alice.as_str()]["totalAmount"], 66);
    assert_eq!(balances[bob.as_str()]["totalAmount"], -66);

    let (status, listed) = send(&app, "GET", &format!("/groups/{}/transactions", group), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let transaction_uri = format!("/transactions/{}", created["id"].as_str().unwrap());
    let (status, _) = send(&app, "DELETE", &transaction_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, balances) = send(&app, "GET", &format!("/groups/{}/balances", group), None).await;
    assert_eq!(balances[bob.as_str()]["totalAmount"], 0);
}

#[tokio::test]
async fn test_forced_amounts_over_total_are_rejected() {
    let app = app();
    let alice = create_user(&app, "Alice").await;
    let group = create_group(&app, &[&alice]).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/groups/{}/transactions", group),
        Some(json!({
            "paidBy": alice,
            "paidFor": [{ "user": alice, "forcePrice": 60 }],
            "amount": 50,
            "date": "2024-06-01T12:00:00Z",
            "category": "food"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_group_with_unknown_user_is_rejected() {
    let app = app();
    let alice = create_user(&app, "Alice").await;
    let stranger = uuid::Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/groups",
        Some(json!({ "name": "Trip", "users": [alice, stranger] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "field \"users\" must be a list of valid users: got 1 valid users out of 2"
    );
}

#[tokio::test]
async fn test_groups_can_be_filtered_by_user() {
    let app = app();
    let alice = create_user(&app, "Alice").await;
    let bob = create_user(&app, "Bob").await;
    create_group(&app, &[&alice]).await;
    create_group(&app, &[&alice, &bob]).await;

    let (status, body) = send(&app, "GET", &format!("/groups?user={}", bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, "GET", "/groups?user=nope", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
