use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{accounts, bookings, educations, employees, rooms, universities};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub hiring_date: NaiveDate,
    pub email: String,
    pub phone_number: String,
    pub university_code: String,
    pub university_name: String,
    pub major: String,
    pub degree: String,
    pub gpa: f64,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub otp: i32,
    pub new_password: String,
}

// ============================================================================
// Entity DTOs (the password hash and OTP state never leave the service)
// ============================================================================

#[derive(Debug, Serialize)]
pub struct EmployeeDto {
    pub guid: Uuid,
    pub nik: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub hiring_date: NaiveDate,
    pub email: String,
    pub phone_number: String,
}

impl From<employees::Model> for EmployeeDto {
    fn from(model: employees::Model) -> Self {
        Self {
            guid: model.guid,
            nik: model.nik,
            first_name: model.first_name,
            last_name: model.last_name,
            birth_date: model.birth_date,
            gender: model.gender,
            hiring_date: model.hiring_date,
            email: model.email,
            phone_number: model.phone_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub hiring_date: NaiveDate,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct AccountDto {
    pub guid: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<accounts::Model> for AccountDto {
    fn from(model: accounts::Model) -> Self {
        Self {
            guid: model.guid,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    pub guid: Uuid,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UniversityDto {
    pub guid: Uuid,
    pub code: String,
    pub name: String,
}

impl From<universities::Model> for UniversityDto {
    fn from(model: universities::Model) -> Self {
        Self {
            guid: model.guid,
            code: model.code,
            name: model.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UniversityRequest {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EducationDto {
    pub guid: Uuid,
    pub major: String,
    pub degree: String,
    pub gpa: f64,
    pub university_guid: Uuid,
}

impl From<educations::Model> for EducationDto {
    fn from(model: educations::Model) -> Self {
        Self {
            guid: model.guid,
            major: model.major,
            degree: model.degree,
            gpa: model.gpa,
            university_guid: model.university_guid,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub guid: Uuid,
    pub major: String,
    pub degree: String,
    pub gpa: f64,
    pub university_guid: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RoomDto {
    pub guid: Uuid,
    pub name: String,
    pub floor: i32,
    pub capacity: i32,
}

impl From<rooms::Model> for RoomDto {
    fn from(model: rooms::Model) -> Self {
        Self {
            guid: model.guid,
            name: model.name,
            floor: model.floor,
            capacity: model.capacity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomRequest {
    pub name: String,
    pub floor: i32,
    pub capacity: i32,
}

#[derive(Debug, Serialize)]
pub struct BookingDto {
    pub guid: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub remarks: String,
    pub room_guid: Uuid,
    pub employee_guid: Uuid,
}

impl From<bookings::Model> for BookingDto {
    fn from(model: bookings::Model) -> Self {
        Self {
            guid: model.guid,
            start_date: model.start_date,
            end_date: model.end_date,
            status: model.status,
            remarks: model.remarks,
            room_guid: model.room_guid,
            employee_guid: model.employee_guid,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub remarks: String,
    pub room_guid: Uuid,
    pub employee_guid: Uuid,
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub employees: u64,
    pub rooms: u64,
    pub bookings: u64,
}
