use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::validate_password;
use super::{AccountDto, AccountRequest, ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::hash_for_account;

pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AccountDto>>>, ApiError> {
    let accounts = state
        .store()
        .list_accounts()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        accounts.into_iter().map(AccountDto::from).collect(),
    )))
}

pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    let account = state
        .store()
        .get_account(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Account", guid))?;

    Ok(Json(ApiResponse::success(AccountDto::from(account))))
}

/// Administrative path; the guid must belong to an existing employee.
/// Registration is the normal route for creating accounts.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AccountRequest>,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    validate_password(&payload.password)?;

    if state
        .store()
        .get_employee(payload.guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .is_none()
    {
        return Err(ApiError::not_found("Employee", payload.guid));
    }

    let security = state.config().read().await.security.clone();
    let password_hash = hash_for_account(&payload.password, &security).await?;

    let account = state
        .store()
        .create_account(payload.guid, password_hash)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(AccountDto::from(account))))
}

/// Replaces the stored password hash.
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AccountRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_password(&payload.password)?;

    let security = state.config().read().await.security.clone();
    let password_hash = hash_for_account(&payload.password, &security).await?;

    let updated = state
        .store()
        .update_account_password(payload.guid, password_hash)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !updated {
        return Err(ApiError::not_found("Account", payload.guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data updated".to_string(),
    })))
}

pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .store()
        .delete_account(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Account", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data deleted".to_string(),
    })))
}
