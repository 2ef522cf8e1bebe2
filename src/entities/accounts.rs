use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Shares the employee guid; one account per employee.
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: Uuid,

    /// Argon2id password hash
    pub password_hash: String,

    /// Six-digit reset secret; valid only while unused and unexpired.
    pub otp: Option<i32>,

    pub otp_expires_at: Option<DateTimeUtc>,

    pub otp_used: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::Guid",
        to = "super::employees::Column::Guid",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Employees,
    #[sea_orm(has_many = "super::account_roles::Entity")]
    AccountRoles,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::account_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
