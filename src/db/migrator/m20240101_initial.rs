use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;
use uuid::Uuid;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Role granted to every account at registration time.
pub const DEFAULT_ROLE: &str = "employee";

/// Elevated role; never granted automatically.
pub const ADMIN_ROLE: &str = "admin";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Universities)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Employees)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Educations)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Accounts)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Roles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(AccountRoles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Rooms)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Bookings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the role table; registration fails without the default role.
        for role_name in [DEFAULT_ROLE, ADMIN_ROLE] {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(Roles)
                .columns([
                    crate::entities::roles::Column::Guid,
                    crate::entities::roles::Column::Name,
                ])
                .values_panic([Uuid::new_v4().into(), role_name.into()])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountRoles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Educations).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Universities).to_owned())
            .await?;

        Ok(())
    }
}
