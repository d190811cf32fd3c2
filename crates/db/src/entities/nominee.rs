//! Nominee entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nominee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Category this nominee competes in.
    #[sea_orm(indexed)]
    pub category_id: String,

    /// Approved media upload illustrating this nominee.
    ///
    /// Approval is checked when the link is created, not afterwards.
    #[sea_orm(nullable)]
    pub linked_media_id: Option<String>,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    /// User who created this nominee.
    pub created_by: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::media_upload::Entity",
        from = "Column::LinkedMediaId",
        to = "super::media_upload::Column::Id",
        on_delete = "SetNull"
    )]
    LinkedMedia,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::media_upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LinkedMedia.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
