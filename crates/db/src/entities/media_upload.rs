//! Media upload entity with its review state machine.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of uploaded media.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[sea_orm(string_value = "photo")]
    Photo,
    #[sea_orm(string_value = "video")]
    Video,
}

/// Review status of an upload.
///
/// Uploads start `Pending`; an admin review moves them to `Approved` or
/// `Rejected`, both terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_upload")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Name of the object as stored.
    pub filename: String,

    pub original_filename: String,

    /// Key of the object in the storage backend. The object's lifetime is
    /// tied to this row.
    pub storage_path: String,

    pub media_type: MediaType,

    pub file_size: i64,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(indexed)]
    pub status: MediaStatus,

    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,

    /// Admin who reviewed this upload.
    #[sea_orm(nullable)]
    pub reviewer_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,

    #[sea_orm(has_many = "super::nominee::Entity")]
    Nominees,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::nominee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nominees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
