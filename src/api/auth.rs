use axum::{
    Json,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

use super::validation::{
    validate_email, validate_gpa, validate_otp, validate_password, validate_required,
};
use super::{
    ApiError, ApiResponse, AppState, ChangePasswordRequest, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest,
};
use crate::services::Registration;

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware for the CRUD surface: requires a valid
/// `Authorization: Bearer <token>` header and exposes the decoded claims
/// to handlers through request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = extract_bearer_token(&headers) {
        if let Ok(claims) = state.tokens().verify(&token) {
            tracing::Span::current().record("user_id", &claims.email);
            request.extensions_mut().insert(claims);
            return Ok(next.run(request).await);
        }
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized");
    Ok(response.into_response())
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;

    Some(token.trim().to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /accounts/register
/// Create the university (if new), employee, education, account and
/// default role grant in one transaction.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_required("First name", &payload.first_name)?;
    validate_required("Gender", &payload.gender)?;
    validate_required("University code", &payload.university_code)?;
    validate_required("University name", &payload.university_name)?;
    validate_required("Major", &payload.major)?;
    validate_required("Degree", &payload.degree)?;
    validate_required("Phone number", &payload.phone_number)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_gpa(payload.gpa)?;

    let registration = Registration {
        first_name: payload.first_name,
        last_name: payload.last_name,
        birth_date: payload.birth_date,
        gender: payload.gender,
        hiring_date: payload.hiring_date,
        email: payload.email,
        phone_number: payload.phone_number,
        university_code: payload.university_code,
        university_name: payload.university_name,
        major: payload.major,
        degree: payload.degree,
        gpa: payload.gpa,
        password: payload.password,
    };

    state.accounts().register(registration).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Account created".to_string(),
    })))
}

/// POST /accounts/login
/// Verify credentials and return a signed access token with role claims.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let token = state
        .accounts()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse { token })))
}

/// POST /accounts/forgot-password/{email}
/// Issue a single-use OTP and email it to the address on file.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let email = validate_email(&email)?;

    state.accounts().request_password_reset(email).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "OTP has been sent to your email".to_string(),
    })))
}

/// PUT /accounts/change-password
/// Accept a new password for a matching, unexpired, unused OTP.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let email = validate_email(&payload.email)?;
    let otp = validate_otp(payload.otp)?;
    validate_password(&payload.new_password)?;

    state
        .accounts()
        .change_password(email, otp, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Password changed".to_string(),
    })))
}
