//! Category service for managing voting categories.

use laurel_common::{AppError, AppResult, IdGenerator};
use laurel_db::{
    entities::{category, nominee},
    repositories::{CategoryRepository, NomineeRepository},
};
use sea_orm::Set;
use serde::Serialize;

/// Category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    nominee_repo: NomineeRepository,
    id_gen: IdGenerator,
}

/// Input for creating a category.
#[derive(Debug, Default)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub max_nominees: Option<i32>,
    pub allow_multiple_votes: Option<bool>,
    pub voting_enabled: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Input for updating a category.
#[derive(Debug, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub max_nominees: Option<i32>,
    pub allow_multiple_votes: Option<bool>,
    pub voting_enabled: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A category with its nominees embedded.
#[derive(Debug, Serialize)]
pub struct CategoryWithNominees {
    #[serde(flatten)]
    pub category: category::Model,
    pub nominees: Vec<nominee::Model>,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository, nominee_repo: NomineeRepository) -> Self {
        Self {
            category_repo,
            nominee_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List categories with their nominees.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<CategoryWithNominees>> {
        let rows = self.category_repo.find_all_with_nominees(active_only).await?;

        Ok(rows
            .into_iter()
            .map(|(category, nominees)| CategoryWithNominees { category, nominees })
            .collect())
    }

    /// Get a category with its nominees.
    pub async fn get(&self, id: &str) -> AppResult<CategoryWithNominees> {
        let (category, nominees) = self
            .category_repo
            .find_with_nominees(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category not found: {id}")))?;

        Ok(CategoryWithNominees { category, nominees })
    }

    /// Create a new category.
    pub async fn create(
        &self,
        created_by: &str,
        input: CreateCategoryInput,
    ) -> AppResult<category::Model> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name is required".to_string()));
        }

        let model = category::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(name.to_string()),
            description: Set(input.description),
            year: Set(input.year),
            max_nominees: Set(input.max_nominees.unwrap_or(10)),
            allow_multiple_votes: Set(input.allow_multiple_votes.unwrap_or(false)),
            voting_enabled: Set(input.voting_enabled.unwrap_or(true)),
            sort_order: Set(input.sort_order.unwrap_or(0)),
            is_active: Set(true),
            created_by: Set(created_by.to_string()),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.category_repo.create(model).await
    }

    /// Update a category.
    pub async fn update(&self, id: &str, input: UpdateCategoryInput) -> AppResult<category::Model> {
        let existing = self.category_repo.get_by_id(id).await?;
        let mut model: category::ActiveModel = existing.into();

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("Category name is required".to_string()));
            }
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(year) = input.year {
            model.year = Set(Some(year));
        }
        if let Some(max_nominees) = input.max_nominees {
            model.max_nominees = Set(max_nominees);
        }
        if let Some(allow_multiple_votes) = input.allow_multiple_votes {
            model.allow_multiple_votes = Set(allow_multiple_votes);
        }
        if let Some(voting_enabled) = input.voting_enabled {
            model.voting_enabled = Set(voting_enabled);
        }
        if let Some(sort_order) = input.sort_order {
            model.sort_order = Set(sort_order);
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }

        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.category_repo.update(model).await
    }

    /// Delete a category.
    ///
    /// Blocked while any nominee still references it; votes are not counted,
    /// so rows from force-deleted nominees remain as ledger history.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.category_repo.get_by_id(id).await?;

        let nominee_count = self.nominee_repo.count_by_category(id).await?;
        if nominee_count > 0 {
            return Err(AppError::HasDependents(
                "Cannot delete category with existing nominees".to_string(),
            ));
        }

        self.category_repo.delete(id).await
    }
}
