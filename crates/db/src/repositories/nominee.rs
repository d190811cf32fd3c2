//! Nominee repository.

use std::sync::Arc;

use crate::entities::{nominee, Nominee};
use laurel_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Nominee repository for database operations.
#[derive(Clone)]
pub struct NomineeRepository {
    db: Arc<DatabaseConnection>,
}

impl NomineeRepository {
    /// Create a new nominee repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a nominee by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<nominee::Model>> {
        Nominee::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a nominee by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<nominee::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nominee not found: {id}")))
    }

    /// List nominees, optionally scoped to a category.
    pub async fn find_all(
        &self,
        category_id: Option<&str>,
        only_active: bool,
    ) -> AppResult<Vec<nominee::Model>> {
        let mut query = Nominee::find().order_by_asc(nominee::Column::Name);

        if let Some(cid) = category_id {
            query = query.filter(nominee::Column::CategoryId.eq(cid));
        }
        if only_active {
            query = query.filter(nominee::Column::IsActive.eq(true));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count nominees referencing a category.
    pub async fn count_by_category(&self, category_id: &str) -> AppResult<u64> {
        Nominee::find()
            .filter(nominee::Column::CategoryId.eq(category_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new nominee.
    pub async fn create(&self, model: nominee::ActiveModel) -> AppResult<nominee::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a nominee.
    pub async fn update(&self, model: nominee::ActiveModel) -> AppResult<nominee::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a nominee.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Nominee::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
