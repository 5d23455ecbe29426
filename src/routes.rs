use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{
    self,
    handlers::{LOGIN_PATH, MEMBERS_PATH, SIGNUP_PATH},
};
use crate::members;
use crate::session;
use crate::shared::AppState;

/// Builds the full application router
///
/// Unmatched paths fall through to the static directory and then to the 404 page.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(members::not_found.into_service());

    let protected = Router::new()
        .route(MEMBERS_PATH, get(members::members))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    Router::new()
        .route("/", get(members::home))
        .route(SIGNUP_PATH, get(auth::signup_form).post(auth::signup))
        .route(LOGIN_PATH, get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
