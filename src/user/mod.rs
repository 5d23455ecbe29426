pub mod models;
pub mod password;
pub mod repository;

pub use models::UserModel;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
