use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use thiserror::Error;
use tokio::task;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::db::repositories::employee::next_nik;
use crate::entities::{account_roles, accounts, educations, employees, roles, universities};

/// Everything the registration transaction writes, with the password
/// already hashed by the caller.
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
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
    pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("default role `{0}` is not seeded")]
    MissingDefaultRole(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<accounts::Model>> {
        accounts::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list accounts")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<accounts::Model>> {
        accounts::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query account by guid")
    }

    /// Creates all registration rows in one transaction: the university
    /// (reused when the code/name pair already exists), the employee with
    /// the next nik, the education record, the account, and the default
    /// role grant. Any failure rolls the whole set back.
    pub async fn register(
        &self,
        record: RegistrationRecord,
        default_role: &str,
    ) -> std::result::Result<Uuid, RegisterError> {
        let txn = self.conn.begin().await?;
        let now = Utc::now().to_rfc3339();

        let university = universities::Entity::find()
            .filter(universities::Column::Code.eq(&record.university_code))
            .filter(universities::Column::Name.eq(&record.university_name))
            .one(&txn)
            .await?;

        let university_guid = match university {
            Some(u) => u.guid,
            None => {
                let guid = Uuid::new_v4();
                universities::ActiveModel {
                    guid: Set(guid),
                    code: Set(record.university_code),
                    name: Set(record.university_name),
                    created_at: Set(now.clone()),
                    updated_at: Set(now.clone()),
                }
                .insert(&txn)
                .await?;
                guid
            }
        };

        let last_nik = employees::Entity::find()
            .order_by_desc(employees::Column::Nik)
            .one(&txn)
            .await?
            .map(|e| e.nik);

        let employee_guid = Uuid::new_v4();
        employees::ActiveModel {
            guid: Set(employee_guid),
            nik: Set(next_nik(last_nik.as_deref())),
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            birth_date: Set(record.birth_date),
            gender: Set(record.gender),
            hiring_date: Set(record.hiring_date),
            email: Set(record.email),
            phone_number: Set(record.phone_number),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        }
        .insert(&txn)
        .await?;

        educations::ActiveModel {
            guid: Set(employee_guid),
            major: Set(record.major),
            degree: Set(record.degree),
            gpa: Set(record.gpa),
            university_guid: Set(university_guid),
        }
        .insert(&txn)
        .await?;

        accounts::ActiveModel {
            guid: Set(employee_guid),
            password_hash: Set(record.password_hash),
            otp: Set(None),
            otp_expires_at: Set(None),
            otp_used: Set(false),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let role = roles::Entity::find()
            .filter(roles::Column::Name.eq(default_role))
            .one(&txn)
            .await?
            .ok_or_else(|| RegisterError::MissingDefaultRole(default_role.to_string()))?;

        account_roles::ActiveModel {
            guid: Set(Uuid::new_v4()),
            account_guid: Set(employee_guid),
            role_guid: Set(role.guid),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(employee_guid)
    }

    /// Verify a password against the stored hash.
    /// Note: This uses `spawn_blocking` because Argon2 verification is
    /// CPU-intensive and would block the async runtime if run directly.
    pub async fn verify_password(&self, guid: Uuid, password: &str) -> Result<bool> {
        let Some(account) = self.get(guid).await? else {
            return Ok(false);
        };

        let password_hash = account.password_hash;
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }

    /// Create an account directly (administrative path; registration is
    /// the normal route). The guid must belong to an existing employee.
    pub async fn create(&self, guid: Uuid, password_hash: String) -> Result<accounts::Model> {
        let now = Utc::now().to_rfc3339();

        accounts::ActiveModel {
            guid: Set(guid),
            password_hash: Set(password_hash),
            otp: Set(None),
            otp_expires_at: Set(None),
            otp_used: Set(false),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create account")
    }

    pub async fn update_password(&self, guid: Uuid, password_hash: String) -> Result<bool> {
        let Some(account) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: accounts::ActiveModel = account.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Arm a fresh reset secret: unused, expiring at the given instant.
    pub async fn set_otp(&self, guid: Uuid, otp: i32, expires_at: DateTime<Utc>) -> Result<bool> {
        let Some(account) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: accounts::ActiveModel = account.into();
        active.otp = Set(Some(otp));
        active.otp_expires_at = Set(Some(expires_at));
        active.otp_used = Set(false);
        active.updated_at = Set(Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Store the new password hash and burn the secret in the same write.
    pub async fn reset_password(&self, guid: Uuid, password_hash: String) -> Result<()> {
        let account = self
            .get(guid)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Account not found: {guid}"))?;

        let mut active: accounts::ActiveModel = account.into();
        active.password_hash = Set(password_hash);
        active.otp_used = Set(true);
        active.updated_at = Set(Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(())
    }

    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = accounts::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete account")?;

        Ok(result.rows_affected > 0)
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None, // output length (use default)
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_verifies() {
        let config = SecurityConfig::default();
        let hash = hash_password("correct horse battery", &config).unwrap();

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse battery", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong password", &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_hashes_are_salted() {
        let config = SecurityConfig::default();
        let a = hash_password("same input", &config).unwrap();
        let b = hash_password("same input", &config).unwrap();
        assert_ne!(a, b);
    }
}
