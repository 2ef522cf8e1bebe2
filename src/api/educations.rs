use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::{validate_gpa, validate_required};
use super::{ApiError, ApiResponse, AppState, EducationDto, EducationRequest, MessageResponse};
use crate::db::EducationInput;

fn to_input(payload: &EducationRequest) -> Result<EducationInput, ApiError> {
    validate_required("Major", &payload.major)?;
    validate_required("Degree", &payload.degree)?;
    validate_gpa(payload.gpa)?;

    Ok(EducationInput {
        major: payload.major.clone(),
        degree: payload.degree.clone(),
        gpa: payload.gpa,
        university_guid: payload.university_guid,
    })
}

pub async fn list_educations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<EducationDto>>>, ApiError> {
    let educations = state
        .store()
        .list_educations()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        educations.into_iter().map(EducationDto::from).collect(),
    )))
}

pub async fn get_education(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<EducationDto>>, ApiError> {
    let education = state
        .store()
        .get_education(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Education", guid))?;

    Ok(Json(ApiResponse::success(EducationDto::from(education))))
}

/// The guid identifies the employee this record belongs to; the
/// referenced university must already exist.
pub async fn create_education(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EducationRequest>,
) -> Result<Json<ApiResponse<EducationDto>>, ApiError> {
    let input = to_input(&payload)?;

    if state
        .store()
        .get_university(payload.university_guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .is_none()
    {
        return Err(ApiError::not_found("University", payload.university_guid));
    }

    let education = state
        .store()
        .create_education(payload.guid, input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(EducationDto::from(education))))
}

pub async fn update_education(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
    Json(payload): Json<EducationRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let input = to_input(&payload)?;

    let updated = state
        .store()
        .update_education(guid, input)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !updated {
        return Err(ApiError::not_found("Education", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data updated".to_string(),
    })))
}

pub async fn delete_education(
    State(state): State<Arc<AppState>>,
    Path(guid): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .store()
        .delete_education(guid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Education", guid));
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Data deleted".to_string(),
    })))
}
