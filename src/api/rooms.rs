use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::validate_required;
use super::{ApiError, ApiResponse, AppState, MessageResponse, RoomDto, RoomRequest};
use crate::db::RoomInput;

fn to_input(payload: RoomRequest) -> Result<RoomInput, ApiError> {
    validate_required("Name", &payload.name)?;

    if payload.capacity <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid capacity: {}. Capacity must be a positive integer",
            payload.capacity
        )));
    }

    Ok(RoomInput {
        name: payload.name,
        floor: payload.floor,
        capacity: payload.capacity,
    })
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError> {
    let rooms = state
        .store()
        .list_rooms()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let room = state
        .store()
        .get_room(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Room", guid))?;

    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let input = to_input(payload)?;

    let room = state
        .store()
        .create_room(input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
    Json(payload): Json<RoomRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let input = to_input(payload)?;

    let updated = state
        .store()
        .update_room(guid, input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !updated {
        return Err(ApiError::not_found("Room", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data updated".to_string(),
    })))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .store()
        .delete_room(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Room", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data deleted".to_string(),
    })))
}
