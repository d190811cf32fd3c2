//! Authentication endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use laurel_common::AppResult;
use laurel_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration response.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: user::Model,
}

/// Register a new user account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let session = state
        .account_service
        .register(laurel_core::account::RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::created(
        "User registered successfully",
        RegisterResponse {
            token: session.token,
            user: session.user,
        },
    ))
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub username: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: user::Model,
}

/// Log in with username-or-email and password.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let session = state
        .account_service
        .login(laurel_core::account::LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Login successful",
        LoginResponse {
            access_token: session.token,
            token_type: "bearer",
            user: session.user,
        },
    ))
}

/// Current user response.
#[derive(Serialize)]
pub struct MeResponse {
    pub user: user::Model,
}

/// Get the current authenticated user.
async fn me(AuthUser(user): AuthUser) -> AppResult<ApiResponse<MeResponse>> {
    Ok(ApiResponse::ok(MeResponse { user }))
}

/// Log out.
///
/// Token disposal is client-side; the endpoint exists for API symmetry.
async fn logout() -> ApiResponse<()> {
    ApiResponse::message("Logged out successfully")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
}
