use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use roomly::api::AppState;
use roomly::config::Config;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_state() -> Arc<AppState> {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    roomly::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state")
}

fn register_payload(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "birth_date": "1985-06-09",
        "gender": "Female",
        "hiring_date": "2022-08-15",
        "email": email,
        "phone_number": phone,
        "university_code": "YALE",
        "university_name": "Yale University",
        "major": "Mathematics",
        "degree": "PhD",
        "gpa": 3.9,
        "password": "original password"
    })
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body_json)
}

async fn register(app: &Router, email: &str, phone: &str) {
    let (status, _) = send_json(
        app,
        "POST",
        "/api/accounts/register",
        register_payload(email, phone),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// The mailer runs in no-op mode under test, so the issued secret is read
/// back from the account row the way the email body would carry it.
async fn issued_otp(state: &Arc<AppState>, email: &str) -> i32 {
    let employee = state
        .store()
        .get_employee_by_email(email)
        .await
        .unwrap()
        .unwrap();

    state
        .store()
        .get_account(employee.guid)
        .await
        .unwrap()
        .unwrap()
        .otp
        .expect("No OTP issued")
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let state = spawn_state().await;
    let app = roomly::api::router(state).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/accounts/forgot-password/nobody@example.com",
        json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let state = spawn_state().await;
    let app = roomly::api::router(state.clone()).await;

    register(&app, "grace@example.com", "+4470000020").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/forgot-password/grace@example.com",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let otp = issued_otp(&state, "grace@example.com").await;
    assert!((100_000..=999_999).contains(&otp));

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/accounts/change-password",
        json!({
            "email": "grace@example.com",
            "otp": otp,
            "new_password": "a brand new password"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The new password logs in; the old one no longer does.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/login",
        json!({ "email": "grace@example.com", "password": "a brand new password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/login",
        json!({ "email": "grace@example.com", "password": "original password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The secret is single-use.
    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/accounts/change-password",
        json!({
            "email": "grace@example.com",
            "otp": otp,
            "new_password": "yet another password"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP is already used");
}

#[tokio::test]
async fn test_wrong_otp_is_rejected() {
    let state = spawn_state().await;
    let app = roomly::api::router(state.clone()).await;

    register(&app, "grace@example.com", "+4470000020").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/forgot-password/grace@example.com",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let otp = issued_otp(&state, "grace@example.com").await;
    let wrong_otp = if otp == 999_999 { otp - 1 } else { otp + 1 };

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/accounts/change-password",
        json!({
            "email": "grace@example.com",
            "otp": wrong_otp,
            "new_password": "a brand new password"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP is invalid");

    // The armed secret is still usable after a failed attempt.
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/accounts/change-password",
        json!({
            "email": "grace@example.com",
            "otp": otp,
            "new_password": "a brand new password"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_otp_is_rejected() {
    let state = spawn_state().await;
    let app = roomly::api::router(state.clone()).await;

    register(&app, "grace@example.com", "+4470000020").await;

    let employee = state
        .store()
        .get_employee_by_email("grace@example.com")
        .await
        .unwrap()
        .unwrap();

    // Arm a secret that expired a minute ago.
    state
        .store()
        .set_account_otp(employee.guid, 123_456, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/accounts/change-password",
        json!({
            "email": "grace@example.com",
            "otp": 123_456,
            "new_password": "a brand new password"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP is expired");
}

#[tokio::test]
async fn test_change_password_without_request_is_rejected() {
    let state = spawn_state().await;
    let app = roomly::api::router(state).await;

    register(&app, "grace@example.com", "+4470000020").await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/accounts/change-password",
        json!({
            "email": "grace@example.com",
            "otp": 123_456,
            "new_password": "a brand new password"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP is invalid");
}

#[tokio::test]
async fn test_registration_rolls_back_without_default_role() {
    let state = spawn_state().await;
    let app = roomly::api::router(state.clone()).await;

    // Empty the role table so the final registration step cannot succeed.
    let roles = state.store().list_roles().await.unwrap();
    for role in roles {
        state.store().delete_role(role.guid).await.unwrap();
    }

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/register",
        register_payload("grace@example.com", "+4470000020"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Nothing from the failed transaction is visible.
    assert!(state.store().list_employees().await.unwrap().is_empty());
    assert!(state.store().list_universities().await.unwrap().is_empty());
    assert!(state.store().list_accounts().await.unwrap().is_empty());
    assert!(state.store().list_educations().await.unwrap().is_empty());
}
