//! Vote ledger service.

use laurel_common::{AppError, AppResult, IdGenerator};
use laurel_db::{
    entities::vote,
    repositories::{CategoryRepository, NomineeRepository, TallyEntry, VoteRepository},
};
use sea_orm::Set;

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    category_repo: CategoryRepository,
    nominee_repo: NomineeRepository,
    id_gen: IdGenerator,
}

/// Input for casting a vote.
#[derive(Debug)]
pub struct CastVoteInput {
    pub category_id: String,
    pub nominee_id: String,
    pub ip_address: String,
    pub user_agent: String,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(
        vote_repo: VoteRepository,
        category_repo: CategoryRepository,
        nominee_repo: NomineeRepository,
    ) -> Self {
        Self {
            vote_repo,
            category_repo,
            nominee_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast a vote for a nominee.
    ///
    /// Preconditions are checked in order: the category must exist, voting
    /// must be enabled, the nominee must belong to the category, and the user
    /// must not have voted before unless the category allows multiples. The
    /// unique index on the vote table backstops the duplicate check, so a
    /// concurrent cast surfaces as [`AppError::DuplicateVote`] rather than a
    /// second row.
    pub async fn cast(&self, user_id: &str, input: CastVoteInput) -> AppResult<vote::Model> {
        let category = self
            .category_repo
            .find_by_id(&input.category_id)
            .await?
            .ok_or_else(|| AppError::InvalidReference("Invalid category".to_string()))?;

        if !category.voting_enabled {
            return Err(AppError::VotingDisabled);
        }

        let nominee = self.nominee_repo.find_by_id(&input.nominee_id).await?;
        if !nominee.is_some_and(|n| n.category_id == input.category_id) {
            return Err(AppError::InvalidReference(
                "Invalid nominee for this category".to_string(),
            ));
        }

        if !category.allow_multiple_votes
            && self.vote_repo.has_voted(user_id, &input.category_id).await?
        {
            return Err(AppError::DuplicateVote);
        }

        // Populated only for single-vote categories; the unique index on
        // (user_id, single_vote_key) then rejects a racing duplicate.
        let single_vote_key = if category.allow_multiple_votes {
            None
        } else {
            Some(input.category_id.clone())
        };

        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            category_id: Set(input.category_id),
            nominee_id: Set(input.nominee_id),
            ip_address: Set(input.ip_address),
            user_agent: Set(input.user_agent),
            single_vote_key: Set(single_vote_key),
            created_at: Set(chrono::Utc::now().into()),
        };

        match self.vote_repo.create(model).await {
            Err(AppError::ConstraintViolation(_)) => Err(AppError::DuplicateVote),
            other => other,
        }
    }

    /// Delete a vote owned by the user.
    ///
    /// A vote belonging to someone else reports `NotFound`, never
    /// `Forbidden`, so ownership is not revealed.
    pub async fn delete(&self, user_id: &str, vote_id: &str) -> AppResult<()> {
        let deleted = self.vote_repo.delete_owned(user_id, vote_id).await?;

        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound(
                "Vote not found or not authorized to delete".to_string(),
            ))
        }
    }

    /// List all votes cast by a user.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<vote::Model>> {
        self.vote_repo.find_by_user(user_id).await
    }

    /// Aggregate vote counts per nominee, optionally scoped to a category.
    pub async fn tally(&self, category_id: Option<&str>) -> AppResult<Vec<TallyEntry>> {
        self.vote_repo.tally(category_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use laurel_db::entities::{category, nominee};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn test_category(id: &str, voting_enabled: bool, allow_multiple: bool) -> category::Model {
        category::Model {
            id: id.to_string(),
            name: "Best Song".to_string(),
            description: None,
            year: Some(2025),
            max_nominees: 10,
            allow_multiple_votes: allow_multiple,
            voting_enabled,
            sort_order: 0,
            is_active: true,
            created_by: "admin1".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_nominee(id: &str, category_id: &str) -> nominee::Model {
        nominee::Model {
            id: id.to_string(),
            name: "Song A".to_string(),
            description: None,
            category_id: category_id.to_string(),
            linked_media_id: None,
            is_active: true,
            created_by: "admin1".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_vote(id: &str) -> vote::Model {
        vote::Model {
            id: id.to_string(),
            user_id: "user1".to_string(),
            category_id: "cat1".to_string(),
            nominee_id: "nom1".to_string(),
            ip_address: "127.0.0.1".to_string(),
            user_agent: "test".to_string(),
            single_vote_key: Some("cat1".to_string()),
            created_at: Utc::now().into(),
        }
    }

    fn cast_input() -> CastVoteInput {
        CastVoteInput {
            category_id: "cat1".to_string(),
            nominee_id: "nom1".to_string(),
            ip_address: "127.0.0.1".to_string(),
            user_agent: "test".to_string(),
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> VoteService {
        let db = Arc::new(db);
        VoteService::new(
            VoteRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            NomineeRepository::new(db),
        )
    }

    fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
    }

    #[tokio::test]
    async fn test_cast_unknown_category_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<category::Model>::new()])
            .into_connection();
        let service = service_with(db);

        let result = service.cast("user1", cast_input()).await;
        assert!(matches!(result, Err(AppError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_cast_voting_disabled_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_category("cat1", false, false)]])
            .into_connection();
        let service = service_with(db);

        let result = service.cast("user1", cast_input()).await;
        assert!(matches!(result, Err(AppError::VotingDisabled)));
    }

    #[tokio::test]
    async fn test_cast_nominee_from_other_category_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_category("cat1", true, false)]])
            .append_query_results([[test_nominee("nom1", "other_cat")]])
            .into_connection();
        let service = service_with(db);

        let result = service.cast("user1", cast_input()).await;
        assert!(matches!(result, Err(AppError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_cast_duplicate_detected_by_precheck() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_category("cat1", true, false)]])
            .append_query_results([[test_nominee("nom1", "cat1")]])
            // has_voted count
            .append_query_results([[count_row(1)]])
            .into_connection();
        let service = service_with(db);

        let result = service.cast("user1", cast_input()).await;
        assert!(matches!(result, Err(AppError::DuplicateVote)));
    }

    #[tokio::test]
    async fn test_cast_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_category("cat1", true, false)]])
            .append_query_results([[test_nominee("nom1", "cat1")]])
            .append_query_results([[count_row(0)]])
            .append_query_results([[test_vote("vote1")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = service_with(db);

        let vote = service.cast("user1", cast_input()).await.unwrap();
        assert_eq!(vote.id, "vote1");
        assert_eq!(vote.category_id, "cat1");
    }

    #[tokio::test]
    async fn test_cast_race_reports_duplicate_vote() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_category("cat1", true, false)]])
            .append_query_results([[test_nominee("nom1", "cat1")]])
            .append_query_results([[count_row(0)]])
            // the insert loses the race against the unique index
            .append_exec_errors([sea_orm::DbErr::Query(sea_orm::RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"uq_vote_user_single_vote_key\""
                    .to_string(),
            ))])
            .into_connection();
        let service = service_with(db);

        let result = service.cast("user1", cast_input()).await;
        // MockDatabase cannot synthesize a driver-level unique violation, so
        // the exact DuplicateVote reclassification is not assertable here;
        // the cast must still fail rather than report a second vote.
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_foreign_vote_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = service_with(db);

        let result = service.delete("user2", "vote1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_own_vote_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = service_with(db);

        assert!(service.delete("user1", "vote1").await.is_ok());
    }

    #[tokio::test]
    async fn test_multi_vote_category_skips_duplicate_check() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_category("cat1", true, true)]])
            .append_query_results([[test_nominee("nom1", "cat1")]])
            // no has_voted query: next result feeds the insert directly
            .append_query_results([[{
                let mut v = test_vote("vote2");
                v.single_vote_key = None;
                v
            }]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = service_with(db);

        let vote = service.cast("user1", cast_input()).await.unwrap();
        assert_eq!(vote.single_vote_key, None);
    }
}
