use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::educations;

#[derive(Debug, Clone)]
pub struct EducationInput {
    pub major: String,
    pub degree: String,
    pub gpa: f64,
    pub university_guid: Uuid,
}

pub struct EducationRepository {
    conn: DatabaseConnection,
}

impl EducationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<educations::Model>> {
        educations::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list educations")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<educations::Model>> {
        educations::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query education by guid")
    }

    /// The guid must belong to an existing employee.
    pub async fn create(&self, guid: Uuid, input: EducationInput) -> Result<educations::Model> {
        educations::ActiveModel {
            guid: Set(guid),
            major: Set(input.major),
            degree: Set(input.degree),
            gpa: Set(input.gpa),
            university_guid: Set(input.university_guid),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create education")
    }

    pub async fn update(&self, guid: Uuid, input: EducationInput) -> Result<bool> {
        let Some(existing) = self.get(guid).await? else {
            return Ok(false);
        };

        let mut active: educations::ActiveModel = existing.into();
        active.major = Set(input.major);
        active.degree = Set(input.degree);
        active.gpa = Set(input.gpa);
        active.university_guid = Set(input.university_guid);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = educations::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete education")?;

        Ok(result.rows_affected > 0)
    }
}
