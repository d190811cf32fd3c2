//! Media endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use laurel_common::{AppError, AppResult};
use laurel_core::{ListMediaQuery, ReviewDecision, ReviewMediaInput, UploadMediaInput};
use laurel_db::entities::{media_upload, MediaStatus};
use serde::Deserialize;

use crate::{
    extractors::{AdminUser, AuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Upload a media object (multipart `file` + optional `description`).
async fn upload_media(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<media_upload::Model>> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("File upload failed: {e}")))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                let original_filename = field
                    .file_name()
                    .map_or_else(|| "file".to_string(), ToString::to_string);
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_string(), ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("File upload failed: {e}")))?
                    .to_vec();
                file = Some((original_filename, content_type, data));
            }
            Some("description") => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("File upload failed: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let (original_filename, content_type, data) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let media = state
        .media_service
        .upload(
            &user.id,
            UploadMediaInput {
                original_filename,
                content_type,
                data,
                description,
            },
        )
        .await?;

    Ok(ApiResponse::ok_with_message("File uploaded successfully", media))
}

/// Listing filters.
#[derive(Debug, Deserialize)]
pub struct ListMediaRequest {
    pub status: Option<MediaStatus>,
}

/// List media. Non-admin callers only see their own uploads.
async fn list_media(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListMediaRequest>,
) -> AppResult<ApiResponse<Vec<media_upload::Model>>> {
    let media = state
        .media_service
        .list_all(ListMediaQuery {
            status: query.status,
            is_admin: user.role.is_admin(),
            user_id: user.id,
        })
        .await?;

    Ok(ApiResponse::ok(media))
}

/// List the current user's uploads.
async fn my_media(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<media_upload::Model>>> {
    let media = state.media_service.list_for_user(&user.id).await?;
    Ok(ApiResponse::ok(media))
}

/// List uploads awaiting review (admin only).
async fn pending_media(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<media_upload::Model>>> {
    let media = state.media_service.list_pending().await?;
    Ok(ApiResponse::ok(media))
}

/// Review request.
#[derive(Debug, Deserialize)]
pub struct ReviewMediaRequest {
    pub media_id: String,
    pub status: ReviewDecision,
    pub admin_notes: Option<String>,
}

/// Review a pending upload (admin only).
async fn review_media(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewMediaRequest>,
) -> AppResult<ApiResponse<media_upload::Model>> {
    let decision = req.status;
    let media = state
        .media_service
        .review(
            &admin.id,
            ReviewMediaInput {
                media_id: req.media_id,
                decision,
                admin_notes: req.admin_notes,
            },
        )
        .await?;

    let verdict = match decision {
        ReviewDecision::Approved => "approved",
        ReviewDecision::Rejected => "rejected",
    };

    Ok(ApiResponse::ok_with_message(
        format!("Media {verdict} successfully"),
        media,
    ))
}

/// Delete an upload (owner or admin).
async fn delete_media(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.media_service.delete(&user.id, user.role, &id).await?;
    Ok(ApiResponse::message("Media deleted successfully"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_media))
        .route("/upload", post(upload_media))
        .route("/my", get(my_media))
        .route("/pending", get(pending_media))
        .route("/review", post(review_media))
        .route("/{id}", delete(delete_media))
}
