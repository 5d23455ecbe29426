use chrono::Duration;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::types::{ValidatedLogin, ValidatedSignup};
use crate::session::{
    generators::SessionIdGenerator, models::SessionModel, repository::SessionRepository, Identity,
};
use crate::shared::AppError;
use crate::user::{models::UserModel, password::PasswordHasher, repository::UserRepository};

/// Orchestrates signup, login and logout over the credential and session stores
pub struct AuthService {
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    session_repository: Arc<dyn SessionRepository + Send + Sync>,
    password_hasher: Arc<dyn PasswordHasher>,
    id_generator: Arc<dyn SessionIdGenerator>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        session_repository: Arc<dyn SessionRepository + Send + Sync>,
        password_hasher: Arc<dyn PasswordHasher>,
        id_generator: Arc<dyn SessionIdGenerator>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            password_hasher,
            id_generator,
            session_ttl,
        }
    }

    /// Registers a new user and opens a session for them
    ///
    /// Fails with `Conflict` when the email is already registered.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: ValidatedSignup) -> Result<SessionModel, AppError> {
        let password_hash = self.password_hasher.hash(&input.password).await?;
        let user = UserModel::new(input.name, input.email, password_hash);

        self.user_repository.create_user(&user).await?;
        info!(user_id = %user.id, "User registered");

        self.open_session(&user.identity()).await
    }

    /// Checks credentials and opens a fresh session
    ///
    /// Fails with `NotFound` for an unknown email and `InvalidCredentials` for a
    /// wrong password. Callers must not let the distinction reach the client.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: ValidatedLogin) -> Result<SessionModel, AppError> {
        let user = self
            .user_repository
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| {
                warn!("Login for unknown email");
                AppError::NotFound("User not found".to_string())
            })?;

        if !self
            .password_hasher
            .verify(&input.password, &user.password_hash)
            .await?
        {
            warn!("Login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        self.open_session(&user.identity()).await
    }

    /// Destroys a session; unknown ids are ignored
    #[instrument(skip(self))]
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        let removed = self.session_repository.delete_session(session_id).await?;
        info!(session_id = %session_id, removed, "Session ended");
        Ok(())
    }

    async fn open_session(&self, identity: &Identity) -> Result<SessionModel, AppError> {
        let session = SessionModel::new(self.id_generator.generate(), identity, self.session_ttl);
        self.session_repository.create_session(&session).await?;

        info!(
            session_id = %session.id,
            expires_at = %session.expires_at,
            "Session opened"
        );
        Ok(session)
    }
}
