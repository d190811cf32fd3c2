//! HTTP API layer for laurel.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: auth, categories, nominees, votes, media
//! - **Extractors**: authenticated user, admin gate
//! - **Middleware**: bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
