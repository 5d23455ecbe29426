use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::Response,
    Form,
};
use tracing::{info, instrument, warn};

use super::{
    types::{LoginForm, SignupForm},
    validation::{validate_login, validate_signup},
};
use crate::pages;
use crate::session::{cookie, models::SessionModel};
use crate::shared::{AppError, AppState};

pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const MEMBERS_PATH: &str = "/members";

/// Shown for both unknown email and wrong password
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

/// GET /signup
pub async fn signup_form() -> Response {
    pages::signup_form()
}

/// GET /login
pub async fn login_form() -> Response {
    pages::login_form()
}

/// HTTP handler for registering a new user
///
/// POST /signup
/// Redirects to /members with a fresh session cookie, or renders the first
/// validation failure inline
#[instrument(name = "signup", skip(state, headers, form))]
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let input = match validate_signup(&form) {
        Ok(input) => input,
        Err(e) => return render_recoverable(e, SIGNUP_PATH),
    };

    match state.auth_service.signup(input).await {
        Ok(session) => start_session(&state, &headers, &session).await,
        Err(e) => render_recoverable(e, SIGNUP_PATH),
    }
}

/// HTTP handler for logging in
///
/// POST /login
#[instrument(name = "login", skip(state, headers, form))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let input = match validate_login(&form) {
        Ok(input) => input,
        Err(e) => return render_recoverable(e, LOGIN_PATH),
    };

    match state.auth_service.login(input).await {
        Ok(session) => start_session(&state, &headers, &session).await,
        Err(e) => render_recoverable(e, LOGIN_PATH),
    }
}

/// HTTP handler for logging out
///
/// GET /logout
/// Always clears the cookie and redirects home, even if the store call fails
#[instrument(name = "logout", skip(state, headers))]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = state.access_guard.session_id_from_headers(&headers) {
        if let Err(e) = state.auth_service.logout(&session_id).await {
            warn!(error = %e, "Failed to destroy session on logout");
        }
    }

    let mut response = pages::found("/");
    response.headers_mut().insert(
        SET_COOKIE,
        cookie::clear_session_cookie(state.config.cookie_secure),
    );
    response
}

/// Issues the cookie for a newly opened session and retires any session the
/// request was already carrying
async fn start_session(
    state: &AppState,
    headers: &HeaderMap,
    session: &SessionModel,
) -> Result<Response, AppError> {
    if let Some(previous) = state.access_guard.session_id_from_headers(headers) {
        if let Err(e) = state.auth_service.logout(&previous).await {
            warn!(error = %e, "Failed to retire previous session");
        }
    }

    let token = state.session_tokens.create_token(&session.id)?;
    let cookie = cookie::session_cookie(
        &token,
        state.config.session_ttl_seconds,
        state.config.cookie_secure,
    )
    .map_err(|e| AppError::TokenError(e.to_string()))?;

    info!(email = %session.email, "Session cookie issued");
    Ok(pages::found_with_cookie(MEMBERS_PATH, cookie))
}

/// Renders user-recoverable failures inline; everything else propagates
fn render_recoverable(err: AppError, retry_path: &str) -> Result<Response, AppError> {
    match err {
        AppError::Validation(msg) | AppError::Conflict(msg) => {
            Ok(pages::form_error(&msg, retry_path))
        }
        AppError::NotFound(_) | AppError::InvalidCredentials => {
            Ok(pages::form_error(LOGIN_FAILED_MESSAGE, retry_path))
        }
        other => Err(other),
    }
}
