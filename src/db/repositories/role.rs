use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{account_roles, roles};

pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<roles::Model>> {
        roles::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list roles")
    }

    pub async fn get(&self, guid: Uuid) -> Result<Option<roles::Model>> {
        roles::Entity::find_by_id(guid)
            .one(&self.conn)
            .await
            .context("Failed to query role by guid")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query role by name")
    }

    /// Names of every role granted to the account, fetched at call time.
    pub async fn names_for_account(&self, account_guid: Uuid) -> Result<Vec<String>> {
        let grants = account_roles::Entity::find()
            .filter(account_roles::Column::AccountGuid.eq(account_guid))
            .find_also_related(roles::Entity)
            .all(&self.conn)
            .await
            .context("Failed to query roles for account")?;

        Ok(grants
            .into_iter()
            .filter_map(|(_, role)| role.map(|r| r.name))
            .collect())
    }

    pub async fn grant(&self, account_guid: Uuid, role_guid: Uuid) -> Result<account_roles::Model> {
        account_roles::ActiveModel {
            guid: Set(Uuid::new_v4()),
            account_guid: Set(account_guid),
            role_guid: Set(role_guid),
        }
        .insert(&self.conn)
        .await
        .context("Failed to grant role")
    }

    pub async fn create(&self, name: String) -> Result<roles::Model> {
        roles::ActiveModel {
            guid: Set(Uuid::new_v4()),
            name: Set(name),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create role")
    }

    pub async fn delete(&self, guid: Uuid) -> Result<bool> {
        let result = roles::Entity::delete_by_id(guid)
            .exec(&self.conn)
            .await
            .context("Failed to delete role")?;

        Ok(result.rows_affected > 0)
    }
}
