use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "educations")]
pub struct Model {
    /// Shares the employee guid; one education record per employee.
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: Uuid,

    pub major: String,

    pub degree: String,

    pub gpa: f64,

    pub university_guid: Uuid,
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
    #[sea_orm(
        belongs_to = "super::universities::Entity",
        from = "Column::UniversityGuid",
        to = "super::universities::Column::Guid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Universities,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::universities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Universities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
