use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::bookings;

#[derive(Debug, Clone)]
pub struct BookingInput {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub remarks: String,
    pub room_guid: Uuid,
    pub employee_guid: Uuid,
}

pub struct BookingRepository {
    conn: DatabaseConnection,
}

impl BookingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<bookings::Model>> {
        bookings::Entity::find()
            .order_by_asc(bookings::Column::StartDate)
            .all(&self.conn)
            .await
            .context("Failed to list bookings")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<bookings::Model>> {
        bookings::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query booking by guid")
    }

    pub async fn create(&self, input: BookingInput) -> Result<bookings::Model> {
        let now = Utc::now().to_rfc3339();

        bookings::ActiveModel {
            guid: Set(Uuid::new_v4()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(input.status),
            remarks: Set(input.remarks),
            room_guid: Set(input.room_guid),
            employee_guid: Set(input.employee_guid),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create booking")
    }

    pub async fn update(&self, guid: Uuid, input: BookingInput) -> Result<bool> {
        let Some(existing) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: bookings::ActiveModel = existing.into();
        active.start_date = Set(input.start_date);
        active.end_date = Set(input.end_date);
        active.status = Set(input.status);
        active.remarks = Set(input.remarks);
        active.room_guid = Set(input.room_guid);
        active.employee_guid = Set(input.employee_guid);
        active.updated_at = Set(Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = bookings::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete booking")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        bookings::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count bookings")
    }
}
