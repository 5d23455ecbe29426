use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::shared::{AppError, AppState};

/// Session authentication middleware - resolves the session cookie and adds the
/// `Identity` to request extensions. Unauthenticated requests are redirected to `/`.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), session::require_session))
/// Handlers can then extract Extension(identity): Extension<Identity>.
#[instrument(skip(state, req, next), fields(path = %req.uri().path()))]
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match state.access_guard.authorize_request(req.headers()).await {
        Ok(identity) => identity,
        Err(AppError::Unauthenticated) => {
            debug!("No valid session, redirecting to home");
            return Err(AppError::Unauthenticated);
        }
        Err(e) => {
            warn!(error = %e, "Session lookup failed");
            return Err(e);
        }
    };

    debug!(email = %identity.email, "Session authorized");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
