use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::{validate_email, validate_required};
use super::{ApiError, ApiResponse, AppState, EmployeeDto, EmployeeRequest, MessageResponse};
use crate::db::EmployeeInput;

fn to_input(payload: EmployeeRequest) -> Result<EmployeeInput, ApiError> {
    validate_required("First name", &payload.first_name)?;
    validate_required("Gender", &payload.gender)?;
    validate_required("Phone number", &payload.phone_number)?;
    validate_email(&payload.email)?;

    Ok(EmployeeInput {
        first_name: payload.first_name,
        last_name: payload.last_name,
        birth_date: payload.birth_date,
        gender: payload.gender,
        hiring_date: payload.hiring_date,
        email: payload.email,
        phone_number: payload.phone_number,
    })
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<EmployeeDto>>>, ApiError> {
    let employees = state
        .store()
        .list_employees()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        employees.into_iter().map(EmployeeDto::from).collect(),
    )))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let employee = state
        .store()
        .get_employee(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Employee", guid))?;

    Ok(Json(ApiResponse::success(EmployeeDto::from(employee))))
}

/// The nik is derived server-side from the current maximum.
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let input = to_input(payload)?;

    let employee = state
        .store()
        .create_employee(input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(EmployeeDto::from(employee))))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let input = to_input(payload)?;

    let updated = state
        .store()
        .update_employee(guid, input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !updated {
        return Err(ApiError::not_found("Employee", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data updated".to_string(),
    })))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .store()
        .delete_employee(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Employee", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data deleted".to_string(),
    })))
}
