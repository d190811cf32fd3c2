//! Vote entity for the vote ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User who cast the vote.
    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(indexed)]
    pub category_id: String,

    #[sea_orm(indexed)]
    pub nominee_id: String,

    /// Request origin, kept for audit.
    pub ip_address: String,

    /// Request user agent, kept for audit.
    pub user_agent: String,

    /// Holds the category id when the category disallows multiple votes,
    /// NULL otherwise. Unique together with `user_id`, so concurrent casts
    /// into a single-vote category collide at the index.
    #[sea_orm(nullable)]
    #[serde(skip_serializing)]
    pub single_vote_key: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::nominee::Entity",
        from = "Column::NomineeId",
        to = "super::nominee::Column::Id"
    )]
    Nominee,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::nominee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nominee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
