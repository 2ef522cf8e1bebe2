use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::validate_required;
use super::{ApiError, ApiResponse, AppState, BookingDto, BookingRequest, MessageResponse};
use crate::db::BookingInput;

fn to_input(payload: BookingRequest) -> Result<BookingInput, ApiError> {
    validate_required("Status", &payload.status)?;

    if payload.end_date <= payload.start_date {
        return Err(ApiError::validation(
            "Booking end date must be after the start date",
        ));
    }

    Ok(BookingInput {
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: payload.status,
        remarks: payload.remarks,
        room_guid: payload.room_guid,
        employee_guid: payload.employee_guid,
    })
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = state
        .store()
        .list_bookings()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .store()
        .get_booking(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Booking", guid))?;

    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

/// Both the room and the employee must already exist.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let input = to_input(payload)?;

    if state
        .store()
        .get_room(input.room_guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .is_none()
    {
        return Err(ApiError::not_found("Room", input.room_guid));
    }

    if state
        .store()
        .get_employee(input.employee_guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .is_none()
    {
        return Err(ApiError::not_found("Employee", input.employee_guid));
    }

    let booking = state
        .store()
        .create_booking(input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let input = to_input(payload)?;

    let updated = state
        .store()
        .update_booking(guid, input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !updated {
        return Err(ApiError::not_found("Booking", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data updated".to_string(),
    })))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .store()
        .delete_booking(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Booking", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data deleted".to_string(),
    })))
}
