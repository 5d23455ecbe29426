use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::session::Identity;

/// Database model for the users table
#[derive(Clone, FromRow)]
pub struct UserModel {
    pub id: String, // UUID v4 as string
    pub name: String,
    pub email: String, // Unique, compared case-sensitively
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserModel {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

// Keeps the hash out of logs and panic messages
impl std::fmt::Debug for UserModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserModel")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
