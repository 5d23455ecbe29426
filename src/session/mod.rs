// Public API - what other modules can use
pub use guard::AccessGuard;
pub use middleware::require_session;
pub use types::Identity;

pub mod cleanup_task;
pub mod cookie;
pub mod generators;
pub mod guard;
mod middleware;
pub mod models;
pub mod repository;
pub mod token;
pub mod types;
