use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

use super::types::Identity;

/// Database model for the sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub id: String, // Opaque random token, never derived from user data
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionModel {
    /// Creates a session bound to `identity` that expires `ttl` from now, or at
    /// the latest representable instant if that overflows
    pub fn new(id: String, identity: &Identity, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            created_at: now,
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
