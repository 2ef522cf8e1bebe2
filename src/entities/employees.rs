use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: Uuid,

    /// Sequential registration number, derived from the current maximum.
    #[sea_orm(unique)]
    pub nik: String,

    pub first_name: String,

    pub last_name: Option<String>,

    pub birth_date: Date,

    pub gender: String,

    pub hiring_date: Date,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub phone_number: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::accounts::Entity")]
    Accounts,
    #[sea_orm(has_one = "super::educations::Entity")]
    Educations,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::educations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educations.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
