//! Media review pipeline service.

use crate::services::storage::StorageService;
use laurel_common::{AppError, AppResult, IdGenerator};
use laurel_db::{
    entities::{media_upload, MediaStatus, MediaType, UserRole},
    repositories::MediaRepository,
};
use sea_orm::Set;
use serde::Deserialize;

/// Maximum upload size (50MB)
pub const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Media service for the upload and review workflow.
#[derive(Clone)]
pub struct MediaService {
    media_repo: MediaRepository,
    storage: StorageService,
    id_gen: IdGenerator,
}

/// Input for recording upload metadata.
///
/// The caller is responsible for having placed the object at `storage_path`
/// already; this only records the facts.
#[derive(Debug)]
pub struct CreateMediaInput {
    pub filename: String,
    pub original_filename: String,
    pub storage_path: String,
    pub media_type: MediaType,
    pub file_size: i64,
    pub description: Option<String>,
}

/// Input for uploading a new media object.
pub struct UploadMediaInput {
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub description: Option<String>,
}

/// An admin review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// Input for reviewing an upload.
#[derive(Debug)]
pub struct ReviewMediaInput {
    pub media_id: String,
    pub decision: ReviewDecision,
    pub admin_notes: Option<String>,
}

/// Listing filters for uploads.
#[derive(Debug)]
pub struct ListMediaQuery {
    pub status: Option<MediaStatus>,
    pub is_admin: bool,
    pub user_id: String,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(media_repo: MediaRepository, storage: StorageService) -> Self {
        Self {
            media_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// Upload a new media object and record its metadata.
    pub async fn upload(
        &self,
        owner_id: &str,
        input: UploadMediaInput,
    ) -> AppResult<media_upload::Model> {
        if input.data.is_empty() {
            return Err(AppError::Validation("No file uploaded".to_string()));
        }
        if input.data.len() > MAX_UPLOAD_SIZE {
            return Err(AppError::Validation(format!(
                "File too large. Maximum size is {MAX_UPLOAD_SIZE} bytes"
            )));
        }

        let filename = generate_filename(&input.original_filename);
        let storage_path = format!("uploads/{owner_id}/{filename}");

        self.storage.save(&storage_path, &input.data).await?;

        let media_type = if input.content_type.starts_with("image/") {
            MediaType::Photo
        } else {
            MediaType::Video
        };

        self.create_metadata(
            owner_id,
            CreateMediaInput {
                filename,
                original_filename: input.original_filename,
                storage_path,
                media_type,
                file_size: input.data.len() as i64,
                description: input.description,
            },
        )
        .await
    }

    /// Record metadata for an already-stored object. Status starts `Pending`.
    pub async fn create_metadata(
        &self,
        owner_id: &str,
        input: CreateMediaInput,
    ) -> AppResult<media_upload::Model> {
        if input.filename.trim().is_empty()
            || input.original_filename.trim().is_empty()
            || input.storage_path.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Filename and storage path are required".to_string(),
            ));
        }
        if input.file_size <= 0 {
            return Err(AppError::Validation("File is empty".to_string()));
        }

        let model = media_upload::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner_id.to_string()),
            filename: Set(input.filename),
            original_filename: Set(input.original_filename),
            storage_path: Set(input.storage_path),
            media_type: Set(input.media_type),
            file_size: Set(input.file_size),
            description: Set(input.description),
            status: Set(MediaStatus::Pending),
            admin_notes: Set(None),
            reviewer_id: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.media_repo.create(model).await
    }

    /// Review a pending upload.
    ///
    /// On rejection the stored object is removed best-effort; the metadata
    /// transition is authoritative and a storage failure never reverts it.
    pub async fn review(
        &self,
        reviewer_id: &str,
        input: ReviewMediaInput,
    ) -> AppResult<media_upload::Model> {
        let media = self.media_repo.get_by_id(&input.media_id).await?;

        if media.status != MediaStatus::Pending {
            return Err(AppError::BadRequest(
                "Media has already been reviewed".to_string(),
            ));
        }

        if input.decision == ReviewDecision::Rejected
            && let Err(e) = self.storage.delete(&media.storage_path).await
        {
            tracing::warn!(
                media_id = %media.id,
                storage_path = %media.storage_path,
                error = %e,
                "Failed to delete rejected media object, keeping metadata transition"
            );
        }

        let status = match input.decision {
            ReviewDecision::Approved => MediaStatus::Approved,
            ReviewDecision::Rejected => MediaStatus::Rejected,
        };

        let mut model: media_upload::ActiveModel = media.into();
        model.status = Set(status);
        model.admin_notes = Set(input.admin_notes);
        model.reviewer_id = Set(Some(reviewer_id.to_string()));
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.media_repo.update(model).await
    }

    /// Delete an upload and its stored object.
    ///
    /// Allowed for the owner and for admins. Object removal is best-effort;
    /// the metadata row removal is authoritative.
    pub async fn delete(
        &self,
        actor_id: &str,
        actor_role: UserRole,
        media_id: &str,
    ) -> AppResult<()> {
        let media = self.media_repo.get_by_id(media_id).await?;

        if !actor_role.is_admin() && media.user_id != actor_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this media".to_string(),
            ));
        }

        if let Err(e) = self.storage.delete(&media.storage_path).await {
            tracing::warn!(
                media_id = %media.id,
                storage_path = %media.storage_path,
                error = %e,
                "Failed to delete media object, proceeding with metadata deletion"
            );
        }

        self.media_repo.delete(media_id).await
    }

    /// Get an upload by id.
    pub async fn get(&self, id: &str) -> AppResult<media_upload::Model> {
        self.media_repo.get_by_id(id).await
    }

    /// List uploads owned by a user.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<media_upload::Model>> {
        self.media_repo.find_by_user(user_id).await
    }

    /// List uploads awaiting review.
    pub async fn list_pending(&self) -> AppResult<Vec<media_upload::Model>> {
        self.media_repo.find_pending().await
    }

    /// List uploads; non-admin callers only ever see their own.
    pub async fn list_all(&self, query: ListMediaQuery) -> AppResult<Vec<media_upload::Model>> {
        let owner_filter = if query.is_admin {
            None
        } else {
            Some(query.user_id.as_str())
        };

        self.media_repo.find_all(query.status, owner_filter).await
    }
}

/// Build a unique stored filename, keeping a sane extension.
fn generate_filename(original_name: &str) -> String {
    let extension = original_name
        .rsplit('.')
        .next()
        .filter(|ext| ext.len() <= 10 && ext.chars().all(char::is_alphanumeric))
        .unwrap_or("bin");

    let timestamp = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple().to_string();

    format!("{timestamp}-{}.{extension}", &random[..8])
}
