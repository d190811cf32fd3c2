//! Nominee service.

use laurel_common::{AppError, AppResult, IdGenerator};
use laurel_db::{
    entities::{nominee, MediaStatus},
    repositories::{CategoryRepository, MediaRepository, NomineeRepository},
};
use sea_orm::Set;

/// Nominee service for business logic.
#[derive(Clone)]
pub struct NomineeService {
    nominee_repo: NomineeRepository,
    category_repo: CategoryRepository,
    media_repo: MediaRepository,
    id_gen: IdGenerator,
}

/// Input for creating a nominee.
#[derive(Debug, Default)]
pub struct CreateNomineeInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub linked_media_id: Option<String>,
}

/// Input for updating a nominee.
#[derive(Debug, Default)]
pub struct UpdateNomineeInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub linked_media_id: Option<String>,
    pub is_active: Option<bool>,
}

impl NomineeService {
    /// Create a new nominee service.
    #[must_use]
    pub const fn new(
        nominee_repo: NomineeRepository,
        category_repo: CategoryRepository,
        media_repo: MediaRepository,
    ) -> Self {
        Self {
            nominee_repo,
            category_repo,
            media_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List nominees, optionally scoped to a category.
    pub async fn list(
        &self,
        category_id: Option<&str>,
        only_active: bool,
    ) -> AppResult<Vec<nominee::Model>> {
        self.nominee_repo.find_all(category_id, only_active).await
    }

    /// Get a nominee by id.
    pub async fn get(&self, id: &str) -> AppResult<nominee::Model> {
        self.nominee_repo.get_by_id(id).await
    }

    /// Create a new nominee.
    ///
    /// The category must resolve; a linked media upload must resolve and be
    /// approved at link time.
    pub async fn create(
        &self,
        created_by: &str,
        input: CreateNomineeInput,
    ) -> AppResult<nominee::Model> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Nominee name is required".to_string()));
        }
        if input.category_id.trim().is_empty() {
            return Err(AppError::Validation("Category is required".to_string()));
        }

        if self
            .category_repo
            .find_by_id(&input.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::InvalidReference("Invalid category".to_string()));
        }

        if let Some(ref media_id) = input.linked_media_id {
            let media = self
                .media_repo
                .find_by_id(media_id)
                .await?
                .ok_or_else(|| AppError::InvalidReference("Invalid media ID".to_string()))?;

            if media.status != MediaStatus::Approved {
                return Err(AppError::MediaNotApproved);
            }
        }

        let model = nominee::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(name.to_string()),
            description: Set(input.description),
            category_id: Set(input.category_id),
            linked_media_id: Set(input.linked_media_id),
            is_active: Set(true),
            created_by: Set(created_by.to_string()),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.nominee_repo.create(model).await
    }

    /// Update a nominee.
    ///
    /// Newly supplied category/media references are re-validated for
    /// existence; media approval is not re-checked on update.
    pub async fn update(&self, id: &str, input: UpdateNomineeInput) -> AppResult<nominee::Model> {
        let existing = self.nominee_repo.get_by_id(id).await?;

        if let Some(ref category_id) = input.category_id
            && self.category_repo.find_by_id(category_id).await?.is_none()
        {
            return Err(AppError::InvalidReference("Invalid category".to_string()));
        }

        if let Some(ref media_id) = input.linked_media_id
            && self.media_repo.find_by_id(media_id).await?.is_none()
        {
            return Err(AppError::InvalidReference("Invalid media ID".to_string()));
        }

        let mut model: nominee::ActiveModel = existing.into();

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("Nominee name is required".to_string()));
            }
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(category_id) = input.category_id {
            model.category_id = Set(category_id);
        }
        if let Some(media_id) = input.linked_media_id {
            model.linked_media_id = Set(Some(media_id));
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }

        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.nominee_repo.update(model).await
    }

    /// Delete a nominee.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.nominee_repo.get_by_id(id).await?;
        self.nominee_repo.delete(id).await
    }
}
