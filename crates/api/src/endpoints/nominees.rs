//! Nominee endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use laurel_common::AppResult;
use laurel_core::{CreateNomineeInput, UpdateNomineeInput};
use laurel_db::entities::nominee;
use serde::Deserialize;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Listing filters.
#[derive(Debug, Deserialize)]
pub struct ListNomineesQuery {
    pub category_id: Option<String>,
    #[serde(default = "default_true")]
    pub only_active: bool,
}

const fn default_true() -> bool {
    true
}

/// List nominees, optionally scoped to a category.
async fn list_nominees(
    State(state): State<AppState>,
    Query(query): Query<ListNomineesQuery>,
) -> AppResult<ApiResponse<Vec<nominee::Model>>> {
    let nominees = state
        .nominee_service
        .list(query.category_id.as_deref(), query.only_active)
        .await?;
    Ok(ApiResponse::ok(nominees))
}

/// Nominee creation request.
#[derive(Debug, Deserialize)]
pub struct CreateNomineeRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub linked_media: Option<String>,
}

/// Create a nominee (admin only).
async fn create_nominee(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateNomineeRequest>,
) -> AppResult<ApiResponse<nominee::Model>> {
    let created = state
        .nominee_service
        .create(
            &admin.id,
            CreateNomineeInput {
                name: req.name,
                description: req.description,
                category_id: req.category,
                linked_media_id: req.linked_media,
            },
        )
        .await?;

    Ok(ApiResponse::created("Nominee created successfully", created))
}

/// Get a nominee by id.
async fn get_nominee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<nominee::Model>> {
    let nominee = state.nominee_service.get(&id).await?;
    Ok(ApiResponse::ok(nominee))
}

/// Nominee update request.
#[derive(Debug, Deserialize)]
pub struct UpdateNomineeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub linked_media: Option<String>,
    pub is_active: Option<bool>,
}

/// Update a nominee (admin only).
async fn update_nominee(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNomineeRequest>,
) -> AppResult<ApiResponse<nominee::Model>> {
    let updated = state
        .nominee_service
        .update(
            &id,
            UpdateNomineeInput {
                name: req.name,
                description: req.description,
                category_id: req.category,
                linked_media_id: req.linked_media,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Nominee updated successfully",
        updated,
    ))
}

/// Delete a nominee (admin only).
async fn delete_nominee(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.nominee_service.delete(&id).await?;
    Ok(ApiResponse::message("Nominee deleted successfully"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_nominees).post(create_nominee))
        .route(
            "/{id}",
            get(get_nominee).put(update_nominee).delete(delete_nominee),
        )
}
