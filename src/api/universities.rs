use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::validate_required;
use super::{ApiError, ApiResponse, AppState, MessageResponse, UniversityDto, UniversityRequest};

pub async fn list_universities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UniversityDto>>>, ApiError> {
    let universities = state
        .store()
        .list_universities()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        universities.into_iter().map(UniversityDto::from).collect(),
    )))
}

pub async fn get_university(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<UniversityDto>>, ApiError> {
    let university = state
        .store()
        .get_university(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("University", guid))?;

    Ok(Json(ApiResponse::success(UniversityDto::from(university))))
}

pub async fn create_university(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UniversityRequest>,
) -> Result<Json<ApiResponse<UniversityDto>>, ApiError> {
    validate_required("Code", &payload.code)?;
    validate_required("Name", &payload.name)?;

    let university = state
        .store()
        .create_university(payload.code, payload.name)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(UniversityDto::from(university))))
}

pub async fn update_university(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
    Json(payload): Json<UniversityRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_required("Code", &payload.code)?;
    validate_required("Name", &payload.name)?;

    let updated = state
        .store()
        .update_university(guid, payload.code, payload.name)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !updated {
        return Err(ApiError::not_found("University", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data updated".to_string(),
    })))
}

pub async fn delete_university(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .store()
        .delete_university(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("University", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data deleted".to_string(),
    })))
}
