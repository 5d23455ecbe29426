use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
    Extension,
};
use rand::seq::IndexedRandom;
use tracing::instrument;

use crate::pages;
use crate::session::Identity;
use crate::shared::{AppError, AppState};

/// Images served from the static directory on the members page
pub const MEMBER_IMAGES: [&str; 3] = ["cat1.jpg", "cat2.jpg", "cat3.jpg"];

/// GET /
#[instrument(name = "home", skip(state, headers))]
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let identity = state.access_guard.current_identity(&headers).await?;
    Ok(pages::home_page(identity.as_ref()))
}

/// GET /members, behind `require_session`
#[instrument(name = "members", skip_all)]
pub async fn members(Extension(identity): Extension<Identity>) -> Response {
    pages::members_page(&identity, random_image())
}

/// Fallback for unmatched paths
pub async fn not_found() -> (StatusCode, Response) {
    (StatusCode::NOT_FOUND, pages::not_found_page())
}

fn random_image() -> &'static str {
    MEMBER_IMAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(MEMBER_IMAGES[0])
}
