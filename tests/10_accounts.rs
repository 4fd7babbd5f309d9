mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{send, test_app};

fn register_body(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "password": "Str0ng!Passw0rd",
    })
}

#[tokio::test]
async fn register_returns_account_with_token() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(register_body("alice", "alice@example.com")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn register_rejects_weak_password() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short",
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "Str0ng!Passw0rd",
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["email"].is_string());
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(register_body("alice", "alice@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same username, different case and email; still taken.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(register_body("ALICE", "other@example.com")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn login_round_trip() {
    let app = test_app();

    send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(register_body("alice", "alice@example.com")),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/login",
        Some(json!({"username": "alice", "password": "Str0ng!Passw0rd"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_unknown_username_is_unauthorized() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/login",
        Some(json!({"username": "nobody", "password": "Str0ng!Passw0rd"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let app = test_app();

    send(
        &app,
        "POST",
        "/api/v1/accounts/register",
        Some(register_body("alice", "alice@example.com")),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts/login",
        Some(json!({"username": "alice", "password": "Wr0ng!Passwrd!"})),
        None,
    )
    .await;

    // Wrong password answers exactly like an unknown username.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
}
