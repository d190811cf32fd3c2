//! Category endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use laurel_common::AppResult;
use laurel_core::{CategoryWithNominees, CreateCategoryInput, UpdateCategoryInput};
use laurel_db::entities::category;
use serde::Deserialize;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Listing filters.
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// List categories with their nominees.
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> AppResult<ApiResponse<Vec<CategoryWithNominees>>> {
    let categories = state.category_service.list(query.active_only).await?;
    Ok(ApiResponse::ok(categories))
}

/// Category creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub max_nominees: Option<i32>,
    pub allow_multiple_votes: Option<bool>,
    pub voting_enabled: Option<bool>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// Create a category (admin only).
async fn create_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> AppResult<ApiResponse<category::Model>> {
    let created = state
        .category_service
        .create(
            &admin.id,
            CreateCategoryInput {
                name: req.name,
                description: req.description,
                year: req.year,
                max_nominees: req.max_nominees,
                allow_multiple_votes: req.allow_multiple_votes,
                voting_enabled: req.voting_enabled,
                sort_order: req.sort_order,
            },
        )
        .await?;

    Ok(ApiResponse::created("Category created successfully", created))
}

/// Get a category with its nominees.
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<CategoryWithNominees>> {
    let category = state.category_service.get(&id).await?;
    Ok(ApiResponse::ok(category))
}

/// Category update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub max_nominees: Option<i32>,
    pub allow_multiple_votes: Option<bool>,
    pub voting_enabled: Option<bool>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Update a category (admin only).
async fn update_category(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> AppResult<ApiResponse<category::Model>> {
    let updated = state
        .category_service
        .update(
            &id,
            UpdateCategoryInput {
                name: req.name,
                description: req.description,
                year: req.year,
                max_nominees: req.max_nominees,
                allow_multiple_votes: req.allow_multiple_votes,
                voting_enabled: req.voting_enabled,
                sort_order: req.sort_order,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Category updated successfully",
        updated,
    ))
}

/// Delete a category (admin only). Blocked while nominees reference it.
async fn delete_category(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.category_service.delete(&id).await?;
    Ok(ApiResponse::message("Category deleted successfully"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
