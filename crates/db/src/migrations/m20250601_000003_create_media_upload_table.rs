//! Create `media_upload` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaUpload::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaUpload::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MediaUpload::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaUpload::Filename)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaUpload::OriginalFilename)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaUpload::StoragePath)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaUpload::MediaType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaUpload::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MediaUpload::Description).text())
                    .col(
                        ColumnDef::new(MediaUpload::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(MediaUpload::AdminNotes).text())
                    .col(ColumnDef::new(MediaUpload::ReviewerId).string_len(32))
                    .col(
                        ColumnDef::new(MediaUpload::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(MediaUpload::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_upload_user")
                            .from(MediaUpload::Table, MediaUpload::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's uploads)
        manager
            .create_index(
                Index::create()
                    .name("idx_media_upload_user_id")
                    .table(MediaUpload::Table)
                    .col(MediaUpload::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: status (for the review queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_media_upload_status")
                    .table(MediaUpload::Table)
                    .col(MediaUpload::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MediaUpload::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MediaUpload {
    Table,
    Id,
    UserId,
    Filename,
    OriginalFilename,
    StoragePath,
    MediaType,
    FileSize,
    Description,
    Status,
    AdminNotes,
    ReviewerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
