//! Category repository.

use std::sync::Arc;

use crate::entities::{category, nominee, Category, Nominee};
use laurel_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Category repository for database operations.
#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<category::Model>> {
        Category::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a category by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<category::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category not found: {id}")))
    }

    /// List categories ordered for display.
    pub async fn find_all(&self, active_only: bool) -> AppResult<Vec<category::Model>> {
        let mut query = Category::find().order_by_asc(category::Column::SortOrder);

        if active_only {
            query = query.filter(category::Column::IsActive.eq(true));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List categories with their nominees embedded.
    pub async fn find_all_with_nominees(
        &self,
        active_only: bool,
    ) -> AppResult<Vec<(category::Model, Vec<nominee::Model>)>> {
        let mut query = Category::find().order_by_asc(category::Column::SortOrder);

        if active_only {
            query = query.filter(category::Column::IsActive.eq(true));
        }

        query
            .find_with_related(Nominee)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a category with its nominees, if it exists.
    pub async fn find_with_nominees(
        &self,
        id: &str,
    ) -> AppResult<Option<(category::Model, Vec<nominee::Model>)>> {
        let mut results = Category::find_by_id(id)
            .find_with_related(Nominee)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(if results.is_empty() {
            None
        } else {
            Some(results.remove(0))
        })
    }

    /// Create a new category.
    pub async fn create(&self, model: category::ActiveModel) -> AppResult<category::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a category.
    pub async fn update(&self, model: category::ActiveModel) -> AppResult<category::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a category.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Category::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
