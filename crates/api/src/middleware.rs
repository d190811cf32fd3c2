//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use laurel_core::{AccountService, CategoryService, MediaService, NomineeService, VoteService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub category_service: CategoryService,
    pub nominee_service: NomineeService,
    pub media_service: MediaService,
    pub vote_service: VoteService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to its user and stores the user in the request
/// extensions; routes decide via extractors whether auth is required.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
