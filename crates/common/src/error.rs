//! Error types for laurel.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A supplied id does not resolve to an existing row (dangling reference).
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("You have already voted in this category")]
    DuplicateVote,

    #[error("Voting is disabled for this category")]
    VotingDisabled,

    #[error("Media must be approved before linking")]
    MediaNotApproved,

    /// Delete blocked because other rows still reference the target.
    #[error("Cannot delete: {0}")]
    HasDependents(String),

    // === Storage-layer signals ===
    /// A uniqueness constraint fired at insert time. Services reclassify this
    /// into a domain error (duplicate vote, taken username); it must never be
    /// the final answer to a caller.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_)
            | Self::Validation(_)
            | Self::InvalidReference(_)
            | Self::DuplicateVote
            | Self::VotingDisabled
            | Self::MediaNotApproved
            | Self::HasDependents(_) => StatusCode::BAD_REQUEST,

            // 5xx Server Errors
            Self::ConstraintViolation(_)
            | Self::Database(_)
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::VotingDisabled => "VOTING_DISABLED",
            Self::MediaNotApproved => "MEDIA_NOT_APPROVED",
            Self::HasDependents(_) => "HAS_DEPENDENTS",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log server errors with context; the caller only sees a sanitized message.
        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::DuplicateVote.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::VotingDisabled.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MediaNotApproved.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::HasDependents("nominees".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_constraint_violation_is_server_error_if_unhandled() {
        // Services are expected to reclassify this; if one leaks it must not
        // surface as a client error.
        let err = AppError::ConstraintViolation("votes".into());
        assert!(err.is_server_error());
        assert_eq!(err.error_code(), "CONSTRAINT_VIOLATION");
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AppError::DuplicateVote.error_code(), "DUPLICATE_VOTE");
        assert_eq!(AppError::VotingDisabled.error_code(), "VOTING_DISABLED");
        assert_eq!(AppError::MediaNotApproved.error_code(), "MEDIA_NOT_APPROVED");
    }
}
