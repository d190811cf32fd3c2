//! Vote endpoints.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, get, post},
    Json, Router,
};
use laurel_common::AppResult;
use laurel_core::CastVoteInput;
use laurel_db::{entities::vote, repositories::TallyEntry};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Vote creation request.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub category_id: String,
    pub nominee_id: String,
}

/// Cast a vote.
async fn cast_vote(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CastVoteRequest>,
) -> AppResult<ApiResponse<vote::Model>> {
    let vote = state
        .vote_service
        .cast(
            &user.id,
            CastVoteInput {
                category_id: req.category_id,
                nominee_id: req.nominee_id,
                ip_address: client_ip(&headers),
                user_agent: user_agent(&headers),
            },
        )
        .await?;

    Ok(ApiResponse::created("Vote recorded successfully", vote))
}

/// List the current user's votes.
async fn my_votes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<vote::Model>>> {
    let votes = state.vote_service.list_for_user(&user.id).await?;
    Ok(ApiResponse::ok(votes))
}

/// Tally filters.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub category_id: Option<String>,
}

/// Get aggregated voting results.
async fn results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> AppResult<ApiResponse<Vec<TallyEntry>>> {
    let tally = state.vote_service.tally(query.category_id.as_deref()).await?;
    Ok(ApiResponse::ok(tally))
}

/// Delete one of the current user's votes.
async fn delete_vote(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.vote_service.delete(&user.id, &id).await?;
    Ok(ApiResponse::message("Vote deleted successfully"))
}

/// Best-effort client address for the audit trail.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(cast_vote))
        .route("/my", get(my_votes))
        .route("/results", get(results))
        .route("/{id}", delete(delete_vote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_unknown() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), "unknown");
        assert_eq!(user_agent(&headers), "unknown");
    }
}
