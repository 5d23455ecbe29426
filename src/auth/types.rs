use serde::Deserialize;
use std::fmt;

/// URL-encoded body of `POST /signup`
///
/// Fields are optional so a missing field surfaces as a validation message
/// rather than an extractor rejection.
#[derive(Deserialize, Default)]
pub struct SignupForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// URL-encoded body of `POST /login`
#[derive(Deserialize, Default)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Signup input that passed validation
pub struct ValidatedSignup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login input that passed validation
pub struct ValidatedLogin {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for ValidatedSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedSignup")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for ValidatedLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedLogin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
