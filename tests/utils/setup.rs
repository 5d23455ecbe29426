use axum::{
    body::Body,
    http::{header::COOKIE, Request},
    response::Response,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use members_portal::{
    app, AppConfig, AppState, BcryptPasswordHasher, InMemorySessionRepository,
    InMemoryUserRepository,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
}

pub struct TestAppBuilder {
    config: AppConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig {
                session_secret: "integration-test-secret".to_string(),
                static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
                purge_interval: None,
                ..AppConfig::default()
            },
        }
    }

    pub fn with_session_ttl_seconds(mut self, ttl: i64) -> Self {
        self.config.session_ttl_seconds = ttl;
        self
    }

    pub fn build(self) -> TestApp {
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new());
        let state = AppState::new(
            users.clone(),
            sessions.clone(),
            Arc::new(BcryptPasswordHasher::with_cost(4)),
            self.config,
        );

        TestApp {
            router: app(state),
            users,
            sessions,
        }
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Response {
        let body = encode(&[("name", name), ("email", email), ("password", password)]);
        self.post_form("/signup", &body, None).await
    }

    pub async fn login(&self, email: &str, password: &str, cookie: Option<&str>) -> Response {
        let body = encode(&[("email", email), ("password", password)]);
        self.post_form("/login", &body, cookie).await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

fn encode(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}
