use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::entities::{accounts, bookings, educations, employees, roles, rooms, universities};

pub mod migrator;
pub mod repositories;

pub use migrator::DEFAULT_ROLE;
pub use repositories::account::{RegisterError, RegistrationRecord};
pub use repositories::booking::BookingInput;
pub use repositories::education::EducationInput;
pub use repositories::employee::EmployeeInput;
pub use repositories::room::RoomInput;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn employee_repo(&self) -> repositories::employee::EmployeeRepository {
        repositories::employee::EmployeeRepository::new(self.conn.clone())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn university_repo(&self) -> repositories::university::UniversityRepository {
        repositories::university::UniversityRepository::new(self.conn.clone())
    }

    fn education_repo(&self) -> repositories::education::EducationRepository {
        repositories::education::EducationRepository::new(self.conn.clone())
    }

    fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    fn room_repo(&self) -> repositories::room::RoomRepository {
        repositories::room::RoomRepository::new(self.conn.clone())
    }

    fn booking_repo(&self) -> repositories::booking::BookingRepository {
        repositories::booking::BookingRepository::new(self.conn.clone())
    }

    // ========== Employees ==========

    pub async fn list_employees(&self) -> Result<Vec<employees::Model>> {
        self.employee_repo().list().await
    }

    pub async fn get_employee(&self, guid: Uuid) -> Result<Option<employees::Model>> {
        self.employee_repo().get(guid).await
    }

    pub async fn get_employee_by_email(&self, email: &str) -> Result<Option<employees::Model>> {
        self.employee_repo().get_by_email(email).await
    }

    pub async fn create_employee(&self, input: EmployeeInput) -> Result<employees::Model> {
        self.employee_repo().create(input).await
    }

    pub async fn update_employee(&self, guid: Uuid, input: EmployeeInput) -> Result<bool> {
        self.employee_repo().update(guid, input).await
    }

    pub async fn delete_employee(&self, guid: Uuid) -> Result<bool> {
        self.employee_repo().delete(guid).await
    }

    pub async fn employee_count(&self) -> Result<u64> {
        self.employee_repo().count().await
    }

    // ========== Accounts ==========

    pub async fn list_accounts(&self) -> Result<Vec<accounts::Model>> {
        self.account_repo().list().await
    }

    pub async fn get_account(&self, guid: Uuid) -> Result<Option<accounts::Model>> {
        self.account_repo().get(guid).await
    }

    pub async fn register_account(
        &self,
        record: RegistrationRecord,
        default_role: &str,
    ) -> std::result::Result<Uuid, RegisterError> {
        self.account_repo().register(record, default_role).await
    }

    pub async fn verify_account_password(&self, guid: Uuid, password: &str) -> Result<bool> {
        self.account_repo().verify_password(guid, password).await
    }

    pub async fn create_account(
        &self,
        guid: Uuid,
        password_hash: String,
    ) -> Result<accounts::Model> {
        self.account_repo().create(guid, password_hash).await
    }

    pub async fn update_account_password(&self, guid: Uuid, password_hash: String) -> Result<bool> {
        self.account_repo().update_password(guid, password_hash).await
    }

    pub async fn set_account_otp(
        &self,
        guid: Uuid,
        otp: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.account_repo().set_otp(guid, otp, expires_at).await
    }

    pub async fn reset_account_password(&self, guid: Uuid, password_hash: String) -> Result<()> {
        self.account_repo().reset_password(guid, password_hash).await
    }

    pub async fn delete_account(&self, guid: Uuid) -> Result<bool> {
        self.account_repo().delete(guid).await
    }

    // ========== Universities ==========

    pub async fn list_universities(&self) -> Result<Vec<universities::Model>> {
        self.university_repo().list().await
    }

    pub async fn get_university(&self, guid: Uuid) -> Result<Option<universities::Model>> {
        self.university_repo().get(guid).await
    }

    pub async fn get_university_by_code_and_name(
        &self,
        code: &str,
        name: &str,
    ) -> Result<Option<universities::Model>> {
        self.university_repo().get_by_code_and_name(code, name).await
    }

    pub async fn create_university(
        &self,
        code: String,
        name: String,
    ) -> Result<universities::Model> {
        self.university_repo().create(code, name).await
    }

    pub async fn update_university(&self, guid: Uuid, code: String, name: String) -> Result<bool> {
        self.university_repo().update(guid, code, name).await
    }

    pub async fn delete_university(&self, guid: Uuid) -> Result<bool> {
        self.university_repo().delete(guid).await
    }

    // ========== Educations ==========

    pub async fn list_educations(&self) -> Result<Vec<educations::Model>> {
        self.education_repo().list().await
    }

    pub async fn get_education(&self, guid: Uuid) -> Result<Option<educations::Model>> {
        self.education_repo().get(guid).await
    }

    pub async fn create_education(
        &self,
        guid: Uuid,
        input: EducationInput,
    ) -> Result<educations::Model> {
        self.education_repo().create(guid, input).await
    }

    pub async fn update_education(&self, guid: Uuid, input: EducationInput) -> Result<bool> {
        self.education_repo().update(guid, input).await
    }

    pub async fn delete_education(&self, guid: Uuid) -> Result<bool> {
        self.education_repo().delete(guid).await
    }

    // ========== Roles ==========

    pub async fn list_roles(&self) -> Result<Vec<roles::Model>> {
        self.role_repo().list().await
    }

    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        self.role_repo().get_by_name(name).await
    }

    pub async fn role_names_for_account(&self, account_guid: Uuid) -> Result<Vec<String>> {
        self.role_repo().names_for_account(account_guid).await
    }

    pub async fn grant_role(&self, account_guid: Uuid, role_guid: Uuid) -> Result<()> {
        self.role_repo().grant(account_guid, role_guid).await?;
        Ok(())
    }

    pub async fn create_role(&self, name: String) -> Result<roles::Model> {
        self.role_repo().create(name).await
    }

    pub async fn delete_role(&self, guid: Uuid) -> Result<bool> {
        self.role_repo().delete(guid).await
    }

    // ========== Rooms ==========

    pub async fn list_rooms(&self) -> Result<Vec<rooms::Model>> {
        self.room_repo().list().await
    }

    pub async fn get_room(&self, guid: Uuid) -> Result<Option<rooms::Model>> {
        self.room_repo().get(guid).await
    }

    pub async fn create_room(&self, input: RoomInput) -> Result<rooms::Model> {
        self.room_repo().create(input).await
    }

    pub async fn update_room(&self, guid: Uuid, input: RoomInput) -> Result<bool> {
        self.room_repo().update(guid, input).await
    }

    pub async fn delete_room(&self, guid: Uuid) -> Result<bool> {
        self.room_repo().delete(guid).await
    }

    pub async fn room_count(&self) -> Result<u64> {
        self.room_repo().count().await
    }

    // ========== Bookings ==========

    pub async fn list_bookings(&self) -> Result<Vec<bookings::Model>> {
        self.booking_repo().list().await
    }

    pub async fn get_booking(&self, guid: Uuid) -> Result<Option<bookings::Model>> {
        self.booking_repo().get(guid).await
    }

    pub async fn create_booking(&self, input: BookingInput) -> Result<bookings::Model> {
        self.booking_repo().create(input).await
    }

    pub async fn update_booking(&self, guid: Uuid, input: BookingInput) -> Result<bool> {
        self.booking_repo().update(guid, input).await
    }

    pub async fn delete_booking(&self, guid: Uuid) -> Result<bool> {
        self.booking_repo().delete(guid).await
    }

    pub async fn booking_count(&self) -> Result<u64> {
        self.booking_repo().count().await
    }
}
