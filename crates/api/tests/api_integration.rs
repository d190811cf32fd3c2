//! API integration tests.
//!
//! These tests verify the API endpoints work correctly together.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use laurel_api::{middleware::AppState, router as api_router};
use laurel_common::config::{AuthConfig, Config, DatabaseConfig, ServerConfig, StorageConfig};
use laurel_core::{
    AccountService, CategoryService, MediaService, NomineeService, NoOpStorage, VoteService,
};
use laurel_db::repositories::{
    CategoryRepository, MediaRepository, NomineeRepository, UserRepository, VoteRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test configuration.
fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            url: "https://example.com".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            max_connections: 10,
            min_connections: 1,
        },
        auth: AuthConfig {
            token_secret: "test-secret".to_string(),
            token_expiry_hours: 24,
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: None,
        },
        storage: StorageConfig {
            path: "/tmp/laurel-test".to_string(),
            base_url: None,
        },
    }
}

/// Create a mock database connection.
fn create_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

/// Create test app state with mock database.
fn create_test_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);
    let config = create_test_config();

    let user_repo = UserRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let nominee_repo = NomineeRepository::new(Arc::clone(&db));
    let media_repo = MediaRepository::new(Arc::clone(&db));
    let vote_repo = VoteRepository::new(Arc::clone(&db));

    let storage = Arc::new(NoOpStorage::new(config.server.url.clone()));

    AppState {
        account_service: AccountService::new(user_repo, &config),
        category_service: CategoryService::new(category_repo.clone(), nominee_repo.clone()),
        nominee_service: NomineeService::new(
            nominee_repo.clone(),
            category_repo.clone(),
            media_repo.clone(),
        ),
        media_service: MediaService::new(media_repo, storage),
        vote_service: VoteService::new(vote_repo, category_repo, nominee_repo),
    }
}

/// Create the test router with the auth middleware layered like the server.
fn create_test_router_with(db: DatabaseConnection) -> Router {
    let state = create_test_state(db);
    api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            laurel_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn create_test_router() -> Router {
    create_test_router_with(create_mock_db())
}

#[tokio::test]
async fn test_cast_vote_without_token_returns_401() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/votes")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"category_id":"cat1","nominee_id":"nom1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_me_without_token_returns_401() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pending_media_without_token_returns_401() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/media/pending")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_succeeds_without_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/logout")
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_results_returns_success_envelope() {
    // Tally query over an empty ledger.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<std::collections::BTreeMap<&str, sea_orm::Value>>::new()])
        .into_connection();
    let app = create_test_router_with(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/votes/results")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_with_invalid_body_returns_client_error() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/register")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_register_with_short_username_returns_400() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/register")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"username":"ab","email":"a@b.com","password":"secret1"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_delete_vote_with_wrong_verb_returns_405() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/votes/vote1")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_categories_returns_success_envelope() {
    // find_with_related issues a single join query; empty result is fine.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<std::collections::BTreeMap<&str, sea_orm::Value>>::new()])
        .into_connection();
    let app = create_test_router_with(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/categories")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
}
