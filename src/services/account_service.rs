//! Domain service for registration, login and password reset.
//!
//! Handles the multi-entity registration transaction, credential
//! verification with token issuance, and the single-use reset secret.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Unknown email and wrong password map to the same message so the
    /// response does not reveal which part failed.
    #[error("Account or password is invalid")]
    InvalidCredentials,

    #[error("Email is invalid")]
    EmailNotFound,

    #[error("OTP is invalid")]
    OtpMismatch,

    #[error("OTP is expired")]
    OtpExpired,

    #[error("OTP is already used")]
    OtpUsed,

    #[error("{0}")]
    Conflict(String),

    #[error("Default role is not configured")]
    MissingDefaultRole,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Everything a new joiner submits, password still in the clear.
#[derive(Debug, Clone)]
pub struct Registration {
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

/// Domain service trait for account workflows.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates the university (if absent), employee, education, account
    /// and default role grant as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Conflict`] on a uniqueness violation and
    /// [`AccountError::MissingDefaultRole`] when the role table has not
    /// been seeded; in both cases nothing is persisted.
    async fn register(&self, registration: Registration) -> Result<(), AccountError>;

    /// Verifies credentials and returns a signed access token embedding
    /// the caller's email, full name and role claims.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown email
    /// and for a wrong password alike.
    async fn login(&self, email: &str, password: &str) -> Result<String, AccountError>;

    /// Issues a fresh single-use reset secret and emails it.
    async fn request_password_reset(&self, email: &str) -> Result<(), AccountError>;

    /// Accepts a new password when the submitted secret matches, is
    /// unexpired and has not been consumed; burns the secret on success.
    async fn change_password(
        &self,
        email: &str,
        otp: i32,
        new_password: &str,
    ) -> Result<(), AccountError>;
}
