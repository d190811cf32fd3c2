//! Laurel server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{middleware, Router};
use laurel_api::{middleware::AppState, router as api_router};
use laurel_common::Config;
use laurel_core::{
    AccountService, CategoryService, LocalStorage, MediaService, NomineeService, StorageService,
    VoteService,
};
use laurel_db::repositories::{
    CategoryRepository, MediaRepository, NomineeRepository, UserRepository, VoteRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laurel=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting laurel server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = laurel_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    laurel_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize storage backend
    let storage_base_url = config
        .storage
        .base_url
        .clone()
        .unwrap_or_else(|| config.server.url.clone());
    let storage: StorageService = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.path),
        storage_base_url,
    ));

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let nominee_repo = NomineeRepository::new(Arc::clone(&db));
    let media_repo = MediaRepository::new(Arc::clone(&db));
    let vote_repo = VoteRepository::new(Arc::clone(&db));

    // Initialize services
    let account_service = AccountService::new(user_repo, &config);
    let category_service = CategoryService::new(category_repo.clone(), nominee_repo.clone());
    let nominee_service = NomineeService::new(
        nominee_repo.clone(),
        category_repo.clone(),
        media_repo.clone(),
    );
    let media_service = MediaService::new(media_repo, storage);
    let vote_service = VoteService::new(vote_repo, category_repo, nominee_repo);

    // Seed the configured admin account
    account_service.ensure_admin().await?;

    // Create app state
    let state = AppState {
        account_service,
        category_service,
        nominee_service,
        media_service,
        vote_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            laurel_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
