//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user_table;
mod m20250601_000002_create_category_table;
mod m20250601_000003_create_media_upload_table;
mod m20250601_000004_create_nominee_table;
mod m20250601_000005_create_vote_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user_table::Migration),
            Box::new(m20250601_000002_create_category_table::Migration),
            Box::new(m20250601_000003_create_media_upload_table::Migration),
            Box::new(m20250601_000004_create_nominee_table::Migration),
            Box::new(m20250601_000005_create_vote_table::Migration),
        ]
    }
}
