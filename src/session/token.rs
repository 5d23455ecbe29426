use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::SessionClaims;
use crate::shared::AppError;

/// Signs session ids into cookie values so a forged or edited cookie is rejected
/// before the session store is consulted
#[derive(Clone)]
pub struct SessionTokenConfig {
    secret: String,
    pub ttl_seconds: i64,
}

impl SessionTokenConfig {
    pub fn new(secret: String, ttl_seconds: i64) -> Self {
        Self {
            secret,
            ttl_seconds,
        }
    }

    /// Creates a signed token wrapping the session id
    #[instrument(skip(self, session_id))]
    pub fn create_token(&self, session_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::TokenError(format!("ttl of {}s is out of range", self.ttl_seconds))
            })?
            .timestamp() as usize;

        debug!(
            ttl_seconds = self.ttl_seconds,
            exp_timestamp = exp,
            "Creating session token"
        );

        let claims = SessionClaims {
            sid: session_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode session token");
            AppError::TokenError(e.to_string())
        })
    }

    /// Verifies signature and expiry, returning the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "Failed to decode session token");
            AppError::TokenError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_token() {
        let config = SessionTokenConfig::new("secret".to_string(), 3600);

        let token = config.create_token("session-123").unwrap();
        assert!(!token.is_empty());

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.sid, "session-123");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_invalid_token() {
        let config = SessionTokenConfig::new("secret".to_string(), 3600);
        let result = config.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::TokenError(_))));
    }

    #[test]
    fn test_token_with_different_secret_is_rejected() {
        let config1 = SessionTokenConfig::new("secret-one".to_string(), 3600);
        let config2 = SessionTokenConfig::new("secret-two".to_string(), 3600);

        let token = config1.create_token("session").unwrap();

        assert!(config1.validate_token(&token).is_ok());
        assert!(matches!(
            config2.validate_token(&token),
            Err(AppError::TokenError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default validation leeway of 60 seconds
        let config = SessionTokenConfig::new("secret".to_string(), -600);
        let token = config.create_token("session").unwrap();

        assert!(matches!(
            config.validate_token(&token),
            Err(AppError::TokenError(_))
        ));
    }

    #[test]
    fn test_out_of_range_ttl_is_an_error() {
        let config = SessionTokenConfig::new("secret".to_string(), i64::MAX);

        assert!(matches!(
            config.create_token("session"),
            Err(AppError::TokenError(_))
        ));
    }
}
