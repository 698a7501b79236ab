//! HTTP surface tests: routes, bodies and status codes.
//!
//! Run with: cargo test --test api_test

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use rust_decimal::Decimal;
use tower::ServiceExt;

use rust_balance_web_server::domain::{AccountId, MonetaryAmount};
use rust_balance_web_server::routes::{AppState, router};
use rust_balance_web_server::services::BalanceService;
use rust_balance_web_server::store::memory::InMemoryAccountStore;

fn seeded_store() -> Arc<InMemoryAccountStore> {
    let store = InMemoryAccountStore::new()
        .with_account(
            AccountId::new(1).unwrap(),
            MonetaryAmount::balance(Decimal::from_str("830.55").unwrap()).unwrap(),
        )
        .with_account(AccountId::new(2).unwrap(), MonetaryAmount::ZERO);
    Arc::new(store)
}

fn app(store: Arc<InMemoryAccountStore>) -> Router {
    let service = Arc::new(BalanceService::new(store));
    router(AppState::new(service, Duration::from_secs(5)))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    dispatch(app, request).await
}

/// Send a body without any `Content-Type`, as existing clients do.
async fn send_bare(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    dispatch(app, request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn balance_info_ok() {
    let (status, body) = send(
        app(seeded_store()),
        Method::GET,
        "/balance-info",
        r#"{"id":"1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"user id":1,"balance":830.55}"#);
}

#[tokio::test]
async fn balance_info_wrong_input() {
    let (status, body) = send(
        app(seeded_store()),
        Method::GET,
        "/balance-info",
        r#"{"id":"-1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"incorrect value id user"}"#);
}

#[tokio::test]
async fn balance_info_user_not_found() {
    let (status, body) = send(
        app(seeded_store()),
        Method::GET,
        "/balance-info",
        r#"{"id":"99999999"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"User not found"}"#);
}

#[tokio::test]
async fn balance_info_accepts_numeric_id() {
    let (status, body) = send(
        app(seeded_store()),
        Method::GET,
        "/balance-info",
        r#"{"id":2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"user id":2,"balance":0}"#);
}

#[tokio::test]
async fn balance_info_large_balance_is_exact() {
    let store = seeded_store();
    store.insert(
        AccountId::new(3).unwrap(),
        MonetaryAmount::balance(Decimal::from_str("1234567890123456.78").unwrap()).unwrap(),
    );

    let (status, body) = send(app(store), Method::GET, "/balance-info", r#"{"id":"3"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"user id":3,"balance":1234567890123456.78}"#);
}

#[tokio::test]
async fn balance_info_without_content_type() {
    let (status, body) = send_bare(
        app(seeded_store()),
        Method::GET,
        "/balance-info",
        r#"{"id":"1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"user id":1,"balance":830.55}"#);
}

#[tokio::test]
async fn up_balance_without_content_type() {
    let store = seeded_store();
    let (status, body) = send_bare(
        app(store.clone()),
        Method::POST,
        "/up-balance",
        r#"{"id":"1","amount":"1000.55"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"user id":1,"top up an amount":1000.55}"#);
    assert_eq!(
        store.balance_of(AccountId::new(1).unwrap()).map(|b| b.value()),
        Some(Decimal::from_str("1831.10").unwrap())
    );
}

#[tokio::test]
async fn up_balance_amount_beyond_storable_range() {
    let store = seeded_store();
    let (status, body) = send(
        app(store.clone()),
        Method::POST,
        "/up-balance",
        r#"{"id":"1","amount":"10000000000000000000000000"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"The amount is too large"}"#);
    assert_eq!(store.reads(), 0);
}

#[tokio::test]
async fn up_balance_ok() {
    let store = seeded_store();
    let (status, body) = send(
        app(store.clone()),
        Method::POST,
        "/up-balance",
        r#"{"id":"2","amount":"1000.55"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"user id":2,"top up an amount":1000.55}"#);
    assert_eq!(
        store.balance_of(AccountId::new(2).unwrap()).map(|b| b.value()),
        Some(Decimal::from_str("1000.55").unwrap())
    );
}

#[tokio::test]
async fn up_balance_error_user_id() {
    let store = seeded_store();
    let (status, body) = send(
        app(store.clone()),
        Method::POST,
        "/up-balance",
        r#"{"id":"-1","amount":"10590.55"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Incorrect value id user"}"#);
    assert_eq!(store.reads(), 0);
}

#[tokio::test]
async fn up_balance_error_amount() {
    let store = seeded_store();
    let (status, body) = send(
        app(store.clone()),
        Method::POST,
        "/up-balance",
        r#"{"id":"1","amount":"-10590.55"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"The amount is negative"}"#);
    assert_eq!(store.reads(), 0);
}

#[tokio::test]
async fn up_balance_missing_amount() {
    let (status, body) = send(
        app(seeded_store()),
        Method::POST,
        "/up-balance",
        r#"{"id":"1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Incorrect value amount"}"#);
}

#[tokio::test]
async fn up_balance_unknown_user() {
    let (status, body) = send(
        app(seeded_store()),
        Method::POST,
        "/up-balance",
        r#"{"id":"99999999","amount":"1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"User not found"}"#);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (status, body) = send(
        app(seeded_store()),
        Method::POST,
        "/up-balance",
        r#"{"id":"1","amount":"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"error parcing JSON"}"#);
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let store = seeded_store();
    store.fail_persists(true);

    let (status, body) = send(
        app(store),
        Method::POST,
        "/up-balance",
        r#"{"id":"1","amount":"1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"internal error"}"#);
}

#[tokio::test]
async fn health_reports_connected() {
    let (status, body) = send(app(seeded_store()), Method::GET, "/health", "").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}
