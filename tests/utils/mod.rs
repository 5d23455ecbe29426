pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
pub use assertions::{assert_redirect, body_text, session_cookie};
#[allow(unused_imports)]
pub use setup::{TestApp, TestAppBuilder};
