use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{
    cookie::extract_session_cookie, repository::SessionRepository, token::SessionTokenConfig,
    types::Identity,
};
use crate::shared::AppError;

/// Read-only gate in front of protected routes
///
/// Expiry is checked passively on every lookup; the guard never writes to the
/// store, so a session's lifetime is never extended by activity.
pub struct AccessGuard {
    repository: Arc<dyn SessionRepository + Send + Sync>,
    tokens: SessionTokenConfig,
}

impl AccessGuard {
    pub fn new(
        repository: Arc<dyn SessionRepository + Send + Sync>,
        tokens: SessionTokenConfig,
    ) -> Self {
        Self { repository, tokens }
    }

    /// Resolves a session id into the identity it is bound to
    #[instrument(skip(self))]
    pub async fn authorize(&self, session_id: &str) -> Result<Identity, AppError> {
        match self.repository.get_session(session_id).await? {
            Some(session) if session.is_expired() => {
                debug!(session_id = %session_id, expires_at = %session.expires_at, "Session has expired");
                Err(AppError::Unauthenticated)
            }
            Some(session) => Ok(session.identity()),
            None => {
                debug!(session_id = %session_id, "Session not found");
                Err(AppError::Unauthenticated)
            }
        }
    }

    /// Extracts and verifies the session id from the request cookie
    ///
    /// A missing, malformed or forged cookie yields `None`.
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let token = extract_session_cookie(headers)?;
        match self.tokens.validate_token(&token) {
            Ok(claims) => Some(claims.sid),
            Err(e) => {
                warn!(error = %e, "Rejected session cookie");
                None
            }
        }
    }

    /// Cookie lookup followed by [`AccessGuard::authorize`]
    pub async fn authorize_request(&self, headers: &HeaderMap) -> Result<Identity, AppError> {
        let session_id = self
            .session_id_from_headers(headers)
            .ok_or(AppError::Unauthenticated)?;
        self.authorize(&session_id).await
    }

    /// Like [`AccessGuard::authorize_request`] but anonymous requests are not an error
    pub async fn current_identity(&self, headers: &HeaderMap) -> Result<Option<Identity>, AppError> {
        match self.authorize_request(headers).await {
            Ok(identity) => Ok(Some(identity)),
            Err(AppError::Unauthenticated) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
