use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "universities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: Uuid,

    pub code: String,

    pub name: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::educations::Entity")]
    Educations,
}

impl Related<super::educations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
