//! User administration endpoints.

use axum::{
    extract::{Path, State},
    routing::post,
    Router,
};
use laurel_common::AppResult;
use laurel_db::entities::user;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Soft-deactivate a user account (admin only).
async fn deactivate_user(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<user::Model>> {
    let user = state.account_service.deactivate(&id).await?;
    Ok(ApiResponse::ok_with_message(
        "User deactivated successfully",
        user,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/deactivate", post(deactivate_user))
}
