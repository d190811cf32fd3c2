//! API endpoints.

mod auth;
mod categories;
mod media;
mod nominees;
mod users;
mod votes;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/nominees", nominees::router())
        .nest("/votes", votes::router())
        .nest("/media", media::router())
        .nest("/users", users::router())
}
