use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
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

async fn spawn_app() -> Router {
    let state = spawn_state().await;
    roomly::api::router(state).await
}

fn register_payload(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "birth_date": "1990-12-10",
        "gender": "Female",
        "hiring_date": "2023-02-01",
        "email": email,
        "phone_number": phone,
        "university_code": "UOL",
        "university_name": "University of London",
        "major": "Mathematics",
        "degree": "BSc",
        "gpa": 3.8,
        "password": "correct horse battery"
    })
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
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

async fn get_with_token(
    app: &Router,
    uri: &str,
    token: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, body_json)
}

async fn register_and_login(app: &Router, email: &str, phone: &str) -> String {
    let (status, _) = send_json(
        app,
        "POST",
        "/api/accounts/register",
        None,
        register_payload(email, phone),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        app,
        "POST",
        "/api/accounts/login",
        None,
        json!({ "email": email, "password": "correct horse battery" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_protected_endpoints_require_token() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = get_with_token(&app, "/api/employees", "not-a-real-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_and_list_employees() {
    let app = spawn_app().await;

    let token = register_and_login(&app, "ada@example.com", "+4470000001").await;

    // The default config secret signs the token; its claims carry the
    // seeded default role.
    let issuer = roomly::tokens::TokenIssuer::new(
        &Config::default().auth.token_secret,
        Config::default().auth.token_ttl_minutes,
    );
    let claims = issuer.verify(&token).unwrap();
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.name, "Ada Lovelace");
    assert!(claims.roles.contains(&"employee".to_string()));

    let (status, body) = get_with_token(&app, "/api/employees", &token).await;
    assert_eq!(status, StatusCode::OK);

    let employees = body["data"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["nik"], "111111");
    assert_eq!(employees[0]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_niks_are_sequential() {
    let app = spawn_app().await;

    let token = register_and_login(&app, "first@example.com", "+4470000010").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/register",
        None,
        register_payload("second@example.com", "+4470000011"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_with_token(&app, "/api/employees", &token).await;
    let niks: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["nik"].as_str().unwrap())
        .collect();

    assert_eq!(niks, vec!["111111", "111112"]);
}

#[tokio::test]
async fn test_login_failures_share_message() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/register",
        None,
        register_payload("ada@example.com", "+4470000001"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (wrong_password_status, wrong_password_body) = send_json(
        &app,
        "POST",
        "/api/accounts/login",
        None,
        json!({ "email": "ada@example.com", "password": "wrong password" }),
    )
    .await;

    let (unknown_email_status, unknown_email_body) = send_json(
        &app,
        "POST",
        "/api/accounts/login",
        None,
        json!({ "email": "nobody@example.com", "password": "correct horse battery" }),
    )
    .await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email_status, StatusCode::UNAUTHORIZED);

    // Neither response may reveal which part of the credentials failed.
    assert_eq!(wrong_password_body["error"], unknown_email_body["error"]);
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/register",
        None,
        register_payload("ada@example.com", "+4470000001"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/accounts/register",
        None,
        register_payload("ada@example.com", "+4470000002"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_university_is_reused_across_registrations() {
    let app = spawn_app().await;

    let token = register_and_login(&app, "first@example.com", "+4470000010").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/accounts/register",
        None,
        register_payload("second@example.com", "+4470000011"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_with_token(&app, "/api/universities", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_validates_fields() {
    let app = spawn_app().await;

    let mut payload = register_payload("ada@example.com", "+4470000001");
    payload["password"] = json!("short");

    let (status, _) = send_json(&app, "POST", "/api/accounts/register", None, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = register_payload("ada@example.com", "+4470000001");
    payload["gpa"] = json!(4.5);

    let (status, _) = send_json(&app, "POST", "/api/accounts/register", None, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = register_payload("not-an-email", "+4470000001");
    payload["email"] = json!("not-an-email");

    let (status, _) = send_json(&app, "POST", "/api/accounts/register", None, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rooms_crud() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "ada@example.com", "+4470000001").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/rooms",
        Some(&token),
        json!({ "name": "Jakarta", "floor": 3, "capacity": 12 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let room_guid = body["data"]["guid"].as_str().unwrap().to_string();

    let (status, body) = get_with_token(&app, &format!("/api/rooms/{room_guid}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Jakarta");

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/rooms/{room_guid}"),
        Some(&token),
        json!({ "name": "Bandung", "floor": 3, "capacity": 8 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_with_token(&app, &format!("/api/rooms/{room_guid}"), &token).await;
    assert_eq!(body["data"]["name"], "Bandung");
    assert_eq!(body["data"]["capacity"], 8);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/rooms/{room_guid}"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_with_token(&app, &format!("/api/rooms/{room_guid}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_requires_existing_room_and_employee() {
    let state = spawn_state().await;
    let app = roomly::api::router(state.clone()).await;

    let token = register_and_login(&app, "ada@example.com", "+4470000001").await;

    let employee = state
        .store()
        .get_employee_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();

    // Unknown room is rejected.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/bookings",
        Some(&token),
        json!({
            "start_date": "2026-03-01T09:00:00Z",
            "end_date": "2026-03-01T11:00:00Z",
            "status": "Requested",
            "remarks": "Sprint planning",
            "room_guid": uuid::Uuid::new_v4(),
            "employee_guid": employee.guid
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/rooms",
        Some(&token),
        json!({ "name": "Jakarta", "floor": 3, "capacity": 12 }),
    )
    .await;
    let room_guid = body["data"]["guid"].as_str().unwrap().to_string();

    // End before start is rejected.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/bookings",
        Some(&token),
        json!({
            "start_date": "2026-03-01T11:00:00Z",
            "end_date": "2026-03-01T09:00:00Z",
            "status": "Requested",
            "remarks": "Sprint planning",
            "room_guid": room_guid,
            "employee_guid": employee.guid
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/bookings",
        Some(&token),
        json!({
            "start_date": "2026-03-01T09:00:00Z",
            "end_date": "2026-03-01T11:00:00Z",
            "status": "Requested",
            "remarks": "Sprint planning",
            "room_guid": room_guid,
            "employee_guid": employee.guid
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Requested");
}

#[tokio::test]
async fn test_deleting_employee_cascades_to_account() {
    let state = spawn_state().await;
    let app = roomly::api::router(state.clone()).await;

    let token = register_and_login(&app, "ada@example.com", "+4470000001").await;

    let employee = state
        .store()
        .get_employee_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/employees/{}", employee.guid),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let account = state.store().get_account(employee.guid).await.unwrap();
    assert!(account.is_none());
}

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "ada@example.com", "+4470000001").await;

    let (status, body) = get_with_token(&app, "/api/system/status", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employees"], 1);
    assert_eq!(body["data"]["rooms"], 0);
    assert!(body["data"]["version"].is_string());
}
