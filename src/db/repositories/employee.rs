use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::employees;

/// First registration number handed out when the table is empty.
const FIRST_NIK: u32 = 111_111;

/// Next sequential registration number after the current maximum.
#[must_use]
pub fn next_nik(last: Option<&str>) -> String {
    match last.and_then(|nik| nik.parse::<u32>().ok()) {
        Some(n) => (n + 1).to_string(),
        None => FIRST_NIK.to_string(),
    }
}

/// Personal and contact fields; the nik and timestamps are managed here.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub hiring_date: NaiveDate,
    pub email: String,
    pub phone_number: String,
}

pub struct EmployeeRepository {
    conn: DatabaseConnection,
}

impl EmployeeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<employees::Model>> {
        employees::Entity::find()
            .order_by_asc(employees::Column::Nik)
            .all(&self.conn)
            .await
            .context("Failed to list employees")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<employees::Model>> {
        employees::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query employee by guid")
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<employees::Model>> {
        employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query employee by email")
    }

    /// Highest registration number currently assigned.
    pub async fn last_nik(&self) -> Result<Option<String>> {
        let employee = employees::Entity::find()
            .order_by_desc(employees::Column::Nik)
            .one(&self.conn)
            .await
            .context("Failed to query last nik")?;

        Ok(employee.map(|e| e.nik))
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<employees::Model> {
        let nik = next_nik(self.last_nik().await?.as_deref());
        let now = chrono::Utc::now().to_rfc3339();

        let model = employees::ActiveModel {
            guid: Set(Uuid::new_v4()),
            nik: Set(nik),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            birth_date: Set(input.birth_date),
            gender: Set(input.gender),
            hiring_date: Set(input.hiring_date),
            email: Set(input.email),
            phone_number: Set(input.phone_number),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        model
            .insert(&self.conn)
            .await
            .context("Failed to create employee")
    }

    /// Nik and creation timestamp are preserved across updates.
    pub async fn update(&self, guid: Uuid, input: EmployeeInput) -> Result<bool> {
        let Some(existing) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: employees::ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.birth_date = Set(input.birth_date);
        active.gender = Set(input.gender);
        active.hiring_date = Set(input.hiring_date);
        active.email = Set(input.email);
        active.phone_number = Set(input.phone_number);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Cascades to the employee's account, education, grants and bookings.
    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = employees::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete employee")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        employees::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count employees")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_nik_starts_at_first() {
        assert_eq!(next_nik(None), "111111");
    }

    #[test]
    fn test_next_nik_increments() {
        assert_eq!(next_nik(Some("111111")), "111112");
        assert_eq!(next_nik(Some("123456")), "123457");
    }

    #[test]
    fn test_next_nik_recovers_from_garbage() {
        assert_eq!(next_nik(Some("not-a-number")), "111111");
    }
}
