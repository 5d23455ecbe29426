use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;

use crate::auth::service::AuthService;
use crate::config::AppConfig;
use crate::pages;
use crate::session::generators::RandomSessionIdGenerator;
use crate::session::guard::AccessGuard;
use crate::session::repository::SessionRepository;
use crate::session::token::SessionTokenConfig;
use crate::user::password::PasswordHasher;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub access_guard: Arc<AccessGuard>,
    pub session_tokens: SessionTokenConfig,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        session_repository: Arc<dyn SessionRepository + Send + Sync>,
        password_hasher: Arc<dyn PasswordHasher>,
        config: AppConfig,
    ) -> Self {
        let session_tokens =
            SessionTokenConfig::new(config.session_secret.clone(), config.session_ttl_seconds);

        let auth_service = AuthService::new(
            user_repository,
            Arc::clone(&session_repository),
            password_hasher,
            Arc::new(RandomSessionIdGenerator::new()),
            config.session_ttl(),
        );
        let access_guard = AccessGuard::new(session_repository, session_tokens.clone());

        Self {
            auth_service: Arc::new(auth_service),
            access_guard: Arc::new(access_guard),
            session_tokens,
            config: Arc::new(config),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::FOUND,
            AppError::TokenError(_) | AppError::DatabaseError(_) | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Unauthenticated => pages::found("/"),
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                (status, pages::error_page(&msg)).into_response()
            }
            AppError::InvalidCredentials => {
                (status, pages::error_page("Invalid email or password")).into_response()
            }
            // Store and token faults are logged at the source; the body stays generic.
            AppError::TokenError(_) | AppError::DatabaseError(_) | AppError::Internal => {
                (status, pages::error_page("Something went wrong")).into_response()
            }
        }
    }
}
