//! Create `vote` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::CategoryId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::NomineeId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::IpAddress).string_len(64).not_null())
                    .col(ColumnDef::new(Vote::UserAgent).string_len(512).not_null())
                    .col(ColumnDef::new(Vote::SingleVoteKey).string_len(32))
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_user")
                            .from(Vote::Table, Vote::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique: one vote per user per single-vote category. SingleVoteKey is
        // NULL for categories that allow multiple votes, and NULLs never
        // collide in a unique index.
        manager
            .create_index(
                Index::create()
                    .name("uq_vote_user_single_vote_key")
                    .table(Vote::Table)
                    .col(Vote::UserId)
                    .col(Vote::SingleVoteKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, category_id) for duplicate pre-checks and "my votes"
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_user_category")
                    .table(Vote::Table)
                    .col(Vote::UserId)
                    .col(Vote::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Index: nominee_id (for tallying)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_nominee_id")
                    .table(Vote::Table)
                    .col(Vote::NomineeId)
                    .to_owned(),
            )
            .await?;

        // Index: category_id (for per-category tallies)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_category_id")
                    .table(Vote::Table)
                    .col(Vote::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vote {
    Table,
    Id,
    UserId,
    CategoryId,
    NomineeId,
    IpAddress,
    UserAgent,
    SingleVoteKey,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
