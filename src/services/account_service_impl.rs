//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::SqlErr;
use std::sync::Arc;
use tokio::task;
use tracing::{info, warn};

use crate::config::{AuthConfig, SecurityConfig};
use crate::db::repositories::account::hash_password;
use crate::db::{RegisterError, RegistrationRecord, Store};
use crate::entities::{accounts, employees};
use crate::services::account_service::{AccountError, AccountService, Registration};
use crate::services::email::EmailService;
use crate::tokens::TokenIssuer;

pub struct SeaOrmAccountService {
    store: Store,
    email: Arc<EmailService>,
    tokens: Arc<TokenIssuer>,
    security: SecurityConfig,
    default_role: String,
    otp_ttl_minutes: i64,
}

impl SeaOrmAccountService {
    #[must_use]
    pub fn new(
        store: Store,
        email: Arc<EmailService>,
        tokens: Arc<TokenIssuer>,
        security: SecurityConfig,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            store,
            email,
            tokens,
            security,
            default_role: auth.default_role.clone(),
            otp_ttl_minutes: auth.otp_ttl_minutes,
        }
    }

    /// Argon2 hashing is CPU-intensive; run it off the async runtime.
    async fn hash_in_background(&self, password: &str) -> Result<String, AccountError> {
        let password = password.to_string();
        let security = self.security.clone();

        task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| AccountError::Internal(format!("Password hashing task panicked: {e}")))?
            .map_err(AccountError::from)
    }

    /// Both records or `EmailNotFound`; the account shares the employee guid.
    async fn credential_by_email(
        &self,
        email: &str,
    ) -> Result<(employees::Model, accounts::Model), AccountError> {
        let employee = self
            .store
            .get_employee_by_email(email)
            .await?
            .ok_or(AccountError::EmailNotFound)?;

        let account = self
            .store
            .get_account(employee.guid)
            .await?
            .ok_or(AccountError::EmailNotFound)?;

        Ok((employee, account))
    }
}

fn full_name(employee: &employees::Model) -> String {
    match &employee.last_name {
        Some(last) => format!("{} {}", employee.first_name, last),
        None => employee.first_name.clone(),
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(&self, registration: Registration) -> Result<(), AccountError> {
        let password_hash = self.hash_in_background(&registration.password).await?;

        let record = RegistrationRecord {
            first_name: registration.first_name,
            last_name: registration.last_name,
            birth_date: registration.birth_date,
            gender: registration.gender,
            hiring_date: registration.hiring_date,
            email: registration.email,
            phone_number: registration.phone_number,
            university_code: registration.university_code,
            university_name: registration.university_name,
            major: registration.major,
            degree: registration.degree,
            gpa: registration.gpa,
            password_hash,
        };

        match self.store.register_account(record, &self.default_role).await {
            Ok(guid) => {
                info!("Registered account {guid}");
                Ok(())
            }
            Err(RegisterError::MissingDefaultRole(role)) => {
                warn!("Registration rejected: default role `{role}` is not seeded");
                Err(AccountError::MissingDefaultRole)
            }
            Err(RegisterError::Db(err)) => {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    Err(AccountError::Conflict(
                        "An employee with the same email, phone number or NIK already exists"
                            .to_string(),
                    ))
                } else {
                    Err(AccountError::from(err))
                }
            }
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AccountError> {
        // A missing employee or account reads the same as a bad password.
        let (employee, account) = match self.credential_by_email(email).await {
            Ok(pair) => pair,
            Err(AccountError::EmailNotFound) => return Err(AccountError::InvalidCredentials),
            Err(other) => return Err(other),
        };

        let is_valid = self
            .store
            .verify_account_password(account.guid, password)
            .await?;

        if !is_valid {
            return Err(AccountError::InvalidCredentials);
        }

        let roles = self.store.role_names_for_account(account.guid).await?;

        let token = self
            .tokens
            .issue(account.guid, &employee.email, &full_name(&employee), roles)?;

        Ok(token)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AccountError> {
        let (employee, account) = self.credential_by_email(email).await?;

        // rand::rng() is a CSPRNG; the secret gates a credential change.
        let otp = rand::rng().random_range(100_000..=999_999);
        let expires_at = Utc::now() + Duration::minutes(self.otp_ttl_minutes);

        self.store
            .set_account_otp(account.guid, otp, expires_at)
            .await?;

        self.email
            .send_otp(&employee.email, otp, self.otp_ttl_minutes)
            .await?;

        info!("Issued reset OTP for account {}", account.guid);
        Ok(())
    }

    async fn change_password(
        &self,
        email: &str,
        otp: i32,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let (_, account) = self.credential_by_email(email).await?;

        if account.otp != Some(otp) {
            return Err(AccountError::OtpMismatch);
        }

        match account.otp_expires_at {
            Some(expires_at) if Utc::now() <= expires_at => {}
            _ => return Err(AccountError::OtpExpired),
        }

        if account.otp_used {
            return Err(AccountError::OtpUsed);
        }

        let password_hash = self.hash_in_background(new_password).await?;

        self.store
            .reset_account_password(account.guid, password_hash)
            .await?;

        info!("Password changed for account {}", account.guid);
        Ok(())
    }
}

/// Used by the administrative account CRUD endpoints, which accept a
/// plaintext password and store the hash.
pub async fn hash_for_account(
    password: &str,
    security: &SecurityConfig,
) -> Result<String, AccountError> {
    let password = password.to_string();
    let security = security.clone();

    task::spawn_blocking(move || hash_password(&password, &security))
        .await
        .map_err(|e| AccountError::Internal(format!("Password hashing task panicked: {e}")))?
        .map_err(AccountError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn employee(first: &str, last: Option<&str>) -> employees::Model {
        employees::Model {
            guid: Uuid::new_v4(),
            nik: "111111".to_string(),
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: "Female".to_string(),
            hiring_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            email: "a@x.com".to_string(),
            phone_number: "+6280000000001".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_full_name_joins_parts() {
        assert_eq!(full_name(&employee("Ada", Some("Lovelace"))), "Ada Lovelace");
    }

    #[test]
    fn test_full_name_without_last_name() {
        assert_eq!(full_name(&employee("Ada", None)), "Ada");
    }
}
