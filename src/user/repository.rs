use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for credential store operations
#[async_trait]
pub trait UserRepository {
    /// Fails with `AppError::Conflict` when the email is already registered
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError>;
    /// Exact, case-sensitive email match
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
}

fn duplicate_email() -> AppError {
    AppError::Conflict("An account with this email already exists".to_string())
}

/// In-memory implementation of UserRepository for development and testing
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserModel>>, // keyed by email
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, UserModel>>, AppError> {
        self.users.lock().map_err(|_| {
            warn!("In-memory user store lock poisoned");
            AppError::DatabaseError("user store unavailable".to_string())
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        let mut users = self.lock()?;
        if users.contains_key(&user.email) {
            warn!("Email already registered in memory");
            return Err(duplicate_email());
        }
        users.insert(user.email.clone(), user.clone());

        debug!(user_id = %user.id, "User created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        let user = self.lock()?.get(email).cloned();
        debug!(found = user.is_some(), "User lookup in memory");
        Ok(user)
    }
}

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the users table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create users table");
            AppError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // The UNIQUE constraint on email makes concurrent duplicate signups lose cleanly
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                warn!("Email already registered in database");
                duplicate_email()
            }
            _ => {
                warn!(error = %e, "Failed to create user in database");
                AppError::DatabaseError(e.to_string())
            }
        })?;

        debug!(user_id = %user.id, "User created in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        let user = sqlx::query_as::<_, UserModel>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user from database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(found = user.is_some(), "User lookup in database");
        Ok(user)
    }
}
