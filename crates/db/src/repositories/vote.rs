//! Vote repository.

use std::sync::Arc;

use crate::entities::{vote, Vote};
use laurel_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, SqlErr,
};
use serde::Serialize;

/// Aggregated vote count for one nominee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    /// Nominee the votes were cast for.
    pub nominee_id: String,
    /// Number of votes.
    pub vote_count: i64,
}

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a vote row.
    ///
    /// The unique index on `(user_id, single_vote_key)` backstops the
    /// duplicate pre-check; when it fires the error surfaces as the typed
    /// [`AppError::ConstraintViolation`] instead of a generic database error.
    pub async fn create(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::ConstraintViolation("vote per user and category".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// List all votes cast by a user.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<vote::Model>> {
        Vote::find()
            .filter(vote::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user has already voted in a category.
    pub async fn has_voted(&self, user_id: &str, category_id: &str) -> AppResult<bool> {
        let count = Vote::find()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::CategoryId.eq(category_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Delete a vote, scoped to its owner.
    ///
    /// A single conditional `DELETE` so that a wrong owner and a missing id
    /// are indistinguishable. Returns whether a row was removed.
    pub async fn delete_owned(&self, user_id: &str, vote_id: &str) -> AppResult<bool> {
        let result = Vote::delete_many()
            .filter(vote::Column::Id.eq(vote_id))
            .filter(vote::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Aggregate vote counts per nominee, optionally scoped to a category.
    pub async fn tally(&self, category_id: Option<&str>) -> AppResult<Vec<TallyEntry>> {
        let mut query = Vote::find()
            .select_only()
            .column(vote::Column::NomineeId)
            .column_as(vote::Column::Id.count(), "vote_count")
            .group_by(vote::Column::NomineeId);

        if let Some(cid) = category_id {
            query = query.filter(vote::Column::CategoryId.eq(cid));
        }

        let rows: Vec<(String, i64)> = query
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(nominee_id, vote_count)| TallyEntry {
                nominee_id,
                vote_count,
            })
            .collect())
    }
}
