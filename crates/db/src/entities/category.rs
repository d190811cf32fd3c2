//! Voting category entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Award year this category belongs to.
    #[sea_orm(nullable)]
    pub year: Option<i32>,

    #[sea_orm(default_value = 10)]
    pub max_nominees: i32,

    /// Whether a user may cast more than one vote in this category.
    #[sea_orm(default_value = false)]
    pub allow_multiple_votes: bool,

    #[sea_orm(default_value = true)]
    pub voting_enabled: bool,

    /// Display ordering, ascending.
    #[sea_orm(default_value = 0)]
    pub sort_order: i32,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    /// User who created this category.
    pub created_by: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::nominee::Entity")]
    Nominees,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    Creator,
}

impl Related<super::nominee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nominees.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
