use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::universities;

pub struct UniversityRepository {
    conn: DatabaseConnection,
}

impl UniversityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<universities::Model>> {
        universities::Entity::find()
            .order_by_asc(universities::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list universities")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<universities::Model>> {
        universities::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query university by guid")
    }

    /// Lookup-or-create key used by registration.
    pub async fn get_by_code_and_name(
        &self,
        code: &str,
        name: &str,
    ) -> Result<Option<universities::Model>> {
        universities::Entity::find()
            .filter(universities::Column::Code.eq(code))
            .filter(universities::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query university by code and name")
    }

    pub async fn create(&self, code: String, name: String) -> Result<universities::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        universities::ActiveModel {
            guid: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create university")
    }

    pub async fn update(&self, guid: Uuid, code: String, name: String) -> Result<bool> {
        let Some(existing) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: universities::ActiveModel = existing.into();
        active.code = Set(code);
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = universities::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete university")?;

        Ok(result.rows_affected > 0)
    }
}
