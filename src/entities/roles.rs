use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: Uuid,

    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_roles::Entity")]
    AccountRoles,
}

impl Related<super::account_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
