// Library crate for the members portal
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod members;
pub mod pages;
pub mod routes;
pub mod session;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use auth::AuthService;
pub use config::AppConfig;
pub use routes::app;
pub use session::{
    repository::{InMemorySessionRepository, PostgresSessionRepository, SessionRepository},
    AccessGuard, Identity,
};
pub use shared::{AppError, AppState};
pub use user::{
    BcryptPasswordHasher, InMemoryUserRepository, PasswordHasher, PostgresUserRepository,
    UserRepository,
};
