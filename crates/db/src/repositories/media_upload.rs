//! Media upload repository.

use std::sync::Arc;

use crate::entities::{media_upload, MediaStatus, MediaUpload};
use laurel_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Media upload repository for database operations.
#[derive(Clone)]
pub struct MediaRepository {
    db: Arc<DatabaseConnection>,
}

impl MediaRepository {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an upload by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<media_upload::Model>> {
        MediaUpload::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an upload by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<media_upload::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media not found: {id}")))
    }

    /// List uploads owned by a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<media_upload::Model>> {
        MediaUpload::find()
            .filter(media_upload::Column::UserId.eq(user_id))
            .order_by_desc(media_upload::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List uploads awaiting review, oldest first.
    pub async fn find_pending(&self) -> AppResult<Vec<media_upload::Model>> {
        MediaUpload::find()
            .filter(media_upload::Column::Status.eq(MediaStatus::Pending))
            .order_by_asc(media_upload::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List uploads with optional status and owner filters, newest first.
    pub async fn find_all(
        &self,
        status: Option<MediaStatus>,
        owner_id: Option<&str>,
    ) -> AppResult<Vec<media_upload::Model>> {
        let mut query = MediaUpload::find().order_by_desc(media_upload::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(media_upload::Column::Status.eq(status));
        }
        if let Some(owner_id) = owner_id {
            query = query.filter(media_upload::Column::UserId.eq(owner_id));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new upload record.
    pub async fn create(&self, model: media_upload::ActiveModel) -> AppResult<media_upload::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an upload record.
    pub async fn update(&self, model: media_upload::ActiveModel) -> AppResult<media_upload::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an upload record.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        MediaUpload::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::MediaType;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_media(id: &str, status: MediaStatus) -> media_upload::Model {
        media_upload::Model {
            id: id.to_string(),
            user_id: "user1".to_string(),
            filename: "123-abc.jpg".to_string(),
            original_filename: "photo.jpg".to_string(),
            storage_path: "uploads/user1/123-abc.jpg".to_string(),
            media_type: MediaType::Photo,
            file_size: 1024,
            description: None,
            status,
            admin_notes: None,
            reviewer_id: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_pending() {
        let m1 = create_test_media("media1", MediaStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1]])
                .into_connection(),
        );

        let repo = MediaRepository::new(db);
        let result = repo.find_pending().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, MediaStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<media_upload::Model>::new()])
                .into_connection(),
        );

        let repo = MediaRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
