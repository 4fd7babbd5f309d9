#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stocks_api::auth::TokenService;
use stocks_api::config::SecurityConfig;
use stocks_api::repository::memory::{
    MemoryCommentRepository, MemoryStockRepository, MemoryUserRepository,
};
use stocks_api::{app, AppState};

/// Router backed by in-memory repositories; no database required.
pub fn test_app() -> Router {
    let stocks = Arc::new(MemoryStockRepository::new());
    let comments = Arc::new(MemoryCommentRepository::new(stocks.clone()));
    let users = Arc::new(MemoryUserRepository::new());

    let tokens = TokenService::from_config(&SecurityConfig {
        jwt_signing_key: "integration-test-signing-key".to_string(),
        jwt_issuer: "stocks-api".to_string(),
        jwt_audience: "stocks-api-clients".to_string(),
        jwt_expiry_days: 7,
    })
    .expect("test token service");

    app(AppState {
        stocks,
        comments,
        users,
        tokens: Arc::new(tokens),
        max_page_size: 100,
        pool: None,
    })
}

/// Send one request through the router and decode the JSON body (Null for
/// empty bodies such as 204s).
pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

pub fn stock_payload(symbol: &str, company_name: &str) -> Value {
    json!({
        "symbol": symbol,
        "company_name": company_name,
        "purchase": "150.00",
        "last_div": "0.5",
        "industry": "Tech",
        "market_cap": 2_000_000,
    })
}

/// Register a throwaway account and return its token.
pub async fn auth_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/accounts/register",
        Some(json!({
            "username": "fixture_user",
            "email": "fixture@example.com",
            "password": "Str0ng!Passw0rd",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "fixture registration failed: {body}");
    body["token"].as_str().expect("token in body").to_string()
}
