//! Create `nominee` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Nominee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Nominee::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Nominee::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Nominee::Description).text())
                    .col(
                        ColumnDef::new(Nominee::CategoryId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Nominee::LinkedMediaId).string_len(32))
                    .col(
                        ColumnDef::new(Nominee::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Nominee::CreatedBy).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Nominee::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Nominee::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nominee_category")
                            .from(Nominee::Table, Nominee::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nominee_linked_media")
                            .from(Nominee::Table, Nominee::LinkedMediaId)
                            .to(MediaUpload::Table, MediaUpload::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: category_id (for listing nominees per category)
        manager
            .create_index(
                Index::create()
                    .name("idx_nominee_category_id")
                    .table(Nominee::Table)
                    .col(Nominee::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Nominee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Nominee {
    Table,
    Id,
    Name,
    Description,
    CategoryId,
    LinkedMediaId,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum MediaUpload {
    Table,
    Id,
}
