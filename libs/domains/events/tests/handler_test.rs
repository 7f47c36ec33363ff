//! Handler tests for the events domain
//!
//! These tests drive the routers directly with tower's `oneshot` to verify:
//! - Request deserialization (JSON → Rust structs)
//! - Validation rejections and their error bodies
//! - HTTP status codes
//!
//! The protected router normally sits behind the JWT middleware; here the
//! claims are injected as a request extension, which is exactly what the
//! middleware does after verifying a token.

use axum::Extension;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::JwtClaims;
use chrono::{Duration, Utc};
use domain_events::{EventFilter, handlers, repository::InMemoryEventRepository, service::EventService};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

fn test_claims(account_id: Uuid) -> JwtClaims {
    let now = Utc::now();
    JwtClaims {
        sub: account_id.to_string(),
        email: "manager@example.com".to_string(),
        name: "Manager".to_string(),
        roles: vec!["user".to_string()],
        exp: (now + Duration::minutes(15)).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    }
}

fn valid_payload() -> Value {
    let enrollment_opens = Utc::now();
    json!({
        "name": "Rust meetup",
        "description": "Monthly meetup",
        "begin_enrollment_at": enrollment_opens,
        "close_enrollment_at": enrollment_opens + Duration::days(7),
        "begin_event_at": enrollment_opens + Duration::days(10),
        "end_event_at": enrollment_opens + Duration::days(11),
        "base_price": 0,
        "max_price": 0,
        "limit_of_enrollment": 20
    })
}

fn post_event(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_event_handler_returns_201_with_derived_flags() {
    let repository = InMemoryEventRepository::new();
    let service = Arc::new(EventService::new(repository));
    let app = handlers::protected_router(service).layer(Extension(test_claims(Uuid::now_v7())));

    let response = app.oneshot(post_event(&valid_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let event = json_body(response.into_body()).await;
    assert_eq!(event["name"], "Rust meetup");
    assert_eq!(event["free"], true);
    assert_eq!(event["offline"], false);
    assert_eq!(event["status"], "draft");
}

#[tokio::test]
async fn test_create_event_handler_rejects_empty_payload_and_persists_nothing() {
    let repository = InMemoryEventRepository::new();
    let service = Arc::new(EventService::new(repository.clone()));
    let app = handlers::protected_router(service).layer(Extension(test_claims(Uuid::now_v7())));

    let response = app.oneshot(post_event(&json!({}))).await.unwrap();

    // Missing required fields fail JSON deserialization
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    use domain_events::repository::EventRepository;
    let events = repository.list(EventFilter::default()).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_create_event_handler_returns_400_with_field_details() {
    let repository = InMemoryEventRepository::new();
    let service = Arc::new(EventService::new(repository.clone()));
    let app = handlers::protected_router(service).layer(Extension(test_claims(Uuid::now_v7())));

    let mut payload = valid_payload();
    payload["name"] = json!("");

    let response = app.oneshot(post_event(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());

    use domain_events::repository::EventRepository;
    let events = repository.list(EventFilter::default()).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_create_event_handler_rejects_wrong_prices_naming_both_fields() {
    let repository = InMemoryEventRepository::new();
    let service = Arc::new(EventService::new(repository));
    let app = handlers::protected_router(service).layer(Extension(test_claims(Uuid::now_v7())));

    let mut payload = valid_payload();
    payload["base_price"] = json!(200);
    payload["max_price"] = json!(100);

    let response = app.oneshot(post_event(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["details"]["base_price"].is_array());
    assert!(body["details"]["max_price"].is_array());
}

#[tokio::test]
async fn test_get_event_handler_rejects_malformed_uuid() {
    let repository = InMemoryEventRepository::new();
    let service = Arc::new(EventService::new(repository));
    let app = handlers::public_router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_get_event_handler_returns_404_for_unknown_id() {
    let repository = InMemoryEventRepository::new();
    let service = Arc::new(EventService::new(repository));
    let app = handlers::public_router(service);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
