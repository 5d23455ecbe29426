use axum::{
    http::{
        header::{LOCATION, SET_COOKIE},
        StatusCode,
    },
    response::Response,
};

/// Asserts a 302 to `location`
pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

/// Returns the `sid=<value>` pair from a `Set-Cookie` header, ready to send back
pub fn session_cookie(response: &Response) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let pair = header.split(';').next()?.trim();
    let value = pair.strip_prefix("sid=")?;
    (!value.is_empty()).then(|| pair.to_string())
}

pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
