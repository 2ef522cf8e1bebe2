use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::rooms;

#[derive(Debug, Clone)]
pub struct RoomInput {
    pub name: String,
    pub floor: i32,
    pub capacity: i32,
}

pub struct RoomRepository {
    conn: DatabaseConnection,
}

impl RoomRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<rooms::Model>> {
        rooms::Entity::find()
            .order_by_asc(rooms::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list rooms")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<rooms::Model>> {
        rooms::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query room by guid")
    }

    pub async fn create(&self, input: RoomInput) -> Result<rooms::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        rooms::ActiveModel {
            guid: Set(Uuid::new_v4()),
            name: Set(input.name),
            floor: Set(input.floor),
            capacity: Set(input.capacity),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create room")
    }

    pub async fn update(&self, guid: Uuid, input: RoomInput) -> Result<bool> {
        let Some(existing) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: rooms::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.floor = Set(input.floor);
        active.capacity = Set(input.capacity);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = rooms::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete room")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        rooms::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count rooms")
    }
}
