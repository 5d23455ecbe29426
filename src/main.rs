use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use members_portal::{
    app, session::cleanup_task::start_cleanup_task, AppConfig, AppState, BcryptPasswordHasher,
    InMemorySessionRepository, InMemoryUserRepository, PostgresSessionRepository,
    PostgresUserRepository, SessionRepository, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "members_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting members portal");

    let config = AppConfig::from_env();

    // Swap between PostgreSQL and in-memory stores based on DATABASE_URL
    let (user_repository, session_repository): (
        Arc<dyn UserRepository + Send + Sync>,
        Arc<dyn SessionRepository + Send + Sync>,
    ) = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            info!("Connected to PostgreSQL");

            let users = PostgresUserRepository::new(pool.clone());
            users.ensure_schema().await?;
            let sessions = PostgresSessionRepository::new(pool);
            sessions.ensure_schema().await?;

            (Arc::new(users), Arc::new(sessions))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory stores");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemorySessionRepository::new()),
            )
        }
    };

    if let Some(purge_interval) = config.purge_interval {
        tokio::spawn(start_cleanup_task(
            Arc::clone(&session_repository),
            purge_interval,
        ));
    }

    let port = config.port;
    let app_state = AppState::new(
        user_repository,
        session_repository,
        Arc::new(BcryptPasswordHasher::new()),
        config,
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
