// Public API - what other modules can use
pub use handlers::{login, login_form, logout, signup, signup_form};
pub use service::AuthService;

// Internal modules
pub mod handlers;
pub mod service;
pub mod types;
pub mod validation;
