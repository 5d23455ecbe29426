//! Input validation for the signup and login forms.
//!
//! Fields are checked in form order and the first violated rule is reported.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{LoginForm, SignupForm, ValidatedLogin, ValidatedSignup};
use crate::shared::AppError;

pub const MAX_NAME_LENGTH: usize = 30;
pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_PASSWORD_LENGTH: usize = 30;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

/// bcrypt ignores everything past this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

// Dot-atom local part, then dot-separated labels ending in an alphabetic TLD
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_%+-]+(?:\.[A-Za-z0-9_%+-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email regex is valid")
});

pub fn validate_signup(form: &SignupForm) -> Result<ValidatedSignup, AppError> {
    let name = required("name", form.name.as_deref())?;
    max_length("name", name, MAX_NAME_LENGTH)?;
    let email = email("email", form.email.as_deref())?;
    let password = password("password", form.password.as_deref())?;

    Ok(ValidatedSignup {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn validate_login(form: &LoginForm) -> Result<ValidatedLogin, AppError> {
    let email = email("email", form.email.as_deref())?;
    let password = password("password", form.password.as_deref())?;

    Ok(ValidatedLogin {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        None => Err(AppError::Validation(format!("\"{field}\" is required"))),
        Some("") => Err(AppError::Validation(format!(
            "\"{field}\" is not allowed to be empty"
        ))),
        Some(value) => Ok(value),
    }
}

fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "\"{field}\" length must be less than or equal to {max} characters long"
        )));
    }
    Ok(())
}

fn min_length(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.chars().count() < min {
        return Err(AppError::Validation(format!(
            "\"{field}\" length must be at least {min} characters long"
        )));
    }
    Ok(())
}

fn email<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    let value = required(field, value)?;
    if value.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(value) {
        return Err(AppError::Validation(format!(
            "\"{field}\" must be a valid email"
        )));
    }
    Ok(value)
}

fn password<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    let value = required(field, value)?;
    min_length(field, value, MIN_PASSWORD_LENGTH)?;
    max_length(field, value, MAX_PASSWORD_LENGTH)?;
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(format!(
            "\"{field}\" must not exceed {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(value)
}
