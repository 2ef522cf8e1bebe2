use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus};

/// GET /system/status
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let store = state.store();

    let employees = store
        .employee_count()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
    let rooms = store
        .room_count()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
    let bookings = store
        .booking_count()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        employees,
        rooms,
        bookings,
    })))
}
