//! Account service: registration, login, credential issuance.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use laurel_common::{AppError, AppResult, Config, IdGenerator};
use laurel_db::{
    entities::{user, UserRole},
    repositories::UserRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account service for user registration and authentication.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
    token_secret: String,
    token_expiry_hours: i64,
    admin_username: String,
    admin_email: String,
    admin_password: Option<String>,
}

/// Bearer token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id the token is bound to.
    sub: String,
    /// Expiry as seconds since the epoch.
    exp: i64,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Input for logging in. The identifier matches username or email.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// An authenticated session: the user plus an issued bearer token.
pub struct AuthSession {
    pub token: String,
    pub user: user::Model,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(user_repo: UserRepository, config: &Config) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
            token_secret: config.auth.token_secret.clone(),
            token_expiry_hours: config.auth.token_expiry_hours,
            admin_username: config.auth.admin_username.clone(),
            admin_email: config.auth.admin_email.clone(),
            admin_password: config.auth.admin_password.clone(),
        }
    }

    /// Register a new user and issue a token.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthSession> {
        input.validate()?;

        // Pre-check for an existing account; the unique constraints on
        // username/email backstop the race below.
        if self
            .user_repo
            .find_by_username_or_email(&input.username, &input.email)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "User with this email or username already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;
        let user_id = self.id_gen.generate();

        let model = user::ActiveModel {
            id: Set(user_id),
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            role: Set(UserRole::User),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let user = match self.user_repo.create(model).await {
            Err(AppError::ConstraintViolation(_)) => {
                return Err(AppError::BadRequest(
                    "User with this email or username already exists".to_string(),
                ));
            }
            other => other?,
        };

        let token = self.issue_token(&user.id)?;
        Ok(AuthSession { token, user })
    }

    /// Authenticate by username-or-email and password, issuing a token.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthSession> {
        let user = self
            .user_repo
            .find_by_identifier(&input.username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active {
            return Err(AppError::Unauthorized);
        }

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.issue_token(&user.id)?;
        Ok(AuthSession { token, user })
    }

    /// Resolve a bearer token to its active user.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user_id = self.verify_token(token)?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Soft-deactivate a user account.
    pub async fn deactivate(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo.deactivate(user_id).await
    }

    /// Get a user by id.
    pub async fn get(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }

    /// Ensure the configured admin account exists.
    ///
    /// Idempotent; called once at startup. Without a configured admin
    /// password no account is created.
    pub async fn ensure_admin(&self) -> AppResult<()> {
        if self
            .user_repo
            .find_by_username_or_email(&self.admin_username, &self.admin_email)
            .await?
            .is_some()
        {
            tracing::info!(username = %self.admin_username, "Admin user already exists");
            return Ok(());
        }

        let Some(ref password) = self.admin_password else {
            tracing::warn!("No admin password configured, skipping admin seeding");
            return Ok(());
        };

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(self.admin_username.clone()),
            email: Set(self.admin_email.clone()),
            password_hash: Set(hash_password(password)?),
            role: Set(UserRole::Admin),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        match self.user_repo.create(model).await {
            // Another instance seeded concurrently.
            Err(AppError::ConstraintViolation(_)) => Ok(()),
            Err(e) => Err(e),
            Ok(user) => {
                tracing::info!(username = %user.username, "Seeded admin user");
                Ok(())
            }
        }
    }

    /// Issue a signed bearer token bound to a user id.
    pub fn issue_token(&self, user_id: &str) -> AppResult<String> {
        let expiry = chrono::Utc::now() + chrono::Duration::hours(self.token_expiry_hours);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.token_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {e}")))
    }

    /// Verify a bearer token and return the bound user id.
    fn verify_token(&self, token: &str) -> AppResult<String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.token_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims.sub)
        .map_err(|_| AppError::Unauthorized)
    }
}

/// Hash a password with argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against an argon2 hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use laurel_common::config::{AuthConfig, DatabaseConfig, ServerConfig, StorageConfig};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                url: "http://localhost:3000".to_string(),
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
                admin_password: Some("admin-password".to_string()),
            },
            storage: StorageConfig {
                path: "/tmp/laurel-test".to_string(),
                base_url: None,
            },
        }
    }

    fn test_user(id: &str, active: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: hash_password("secret1").unwrap(),
            role: UserRole::User,
            is_active: active,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> AccountService {
        AccountService::new(UserRepository::new(Arc::new(db)), &test_config())
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("test_password").unwrap();
        assert!(verify_password("test_password", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_register_input_validation() {
        let too_short = RegisterInput {
            username: "ab".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(too_short.validate().is_err());

        let bad_email = RegisterInput {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());

        let ok = RegisterInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_token_roundtrip() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let token = service.issue_token("user1").unwrap();
        let user_id = service.verify_token(&token).unwrap();
        assert_eq!(user_id, "user1");
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        assert!(matches!(
            service.verify_token("not-a-token"),
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_active_user() {
        let user = test_user("user1", true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();
        let service = service_with(db);

        let token = service.issue_token("user1").unwrap();
        let authed = service.authenticate_by_token(&token).await.unwrap();
        assert_eq!(authed.id, "user1");
    }

    #[tokio::test]
    async fn test_authenticate_by_token_inactive_user_rejected() {
        let user = test_user("user1", false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();
        let service = service_with(db);

        let token = service.issue_token("user1").unwrap();
        let result = service.authenticate_by_token(&token).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_inactive_user_rejected() {
        let user = test_user("user1", false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();
        let service = service_with(db);

        let result = service
            .login(LoginInput {
                username: "alice".to_string(),
                password: "secret1".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
