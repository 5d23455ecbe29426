use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, instrument};

use super::repository::SessionRepository;
use crate::shared::AppError;

/// Periodically deletes expired sessions so the store does not grow without bound.
///
/// Expired sessions are already rejected at lookup time; this only reclaims storage.
#[instrument(skip(session_repository))]
pub async fn start_cleanup_task(
    session_repository: Arc<dyn SessionRepository + Send + Sync>,
    cleanup_interval: Duration,
) {
    info!(
        cleanup_interval_secs = cleanup_interval.as_secs(),
        "Starting expired session cleanup task"
    );

    let mut ticker = interval(cleanup_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if let Err(e) = purge_expired_sessions(&session_repository).await {
            error!(error = %e, "Session cleanup task failed");
        }
    }
}

/// Runs a single purge pass and returns the number of sessions removed
pub async fn purge_expired_sessions(
    session_repository: &Arc<dyn SessionRepository + Send + Sync>,
) -> Result<u64, AppError> {
    let removed = session_repository.cleanup_expired_sessions().await?;
    if removed > 0 {
        info!(removed, "Purged expired sessions");
    }
    Ok(removed)
}
