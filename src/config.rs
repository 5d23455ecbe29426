use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_SECONDS: i64 = 60 * 60; // 1 hour
const MAX_SESSION_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;
const DEFAULT_PURGE_INTERVAL_SECONDS: u64 = 10 * 60;
const DEFAULT_STATIC_DIR: &str = "public";
const DEV_SESSION_SECRET: &str = "dev-session-secret-change-in-production";

/// Runtime configuration, read from the environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// PostgreSQL connection string; in-memory stores are used when absent
    pub database_url: Option<String>,
    pub session_secret: String,
    /// Absolute session lifetime, not renewed on activity
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
    pub static_dir: PathBuf,
    /// `None` disables the background purge of expired sessions
    pub purge_interval: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch the process env
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = match lookup("SESSION_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("SESSION_SECRET is not set, falling back to an insecure development secret");
                DEV_SESSION_SECRET.to_string()
            }
        };

        let session_ttl_seconds = parse_or(&lookup, "SESSION_TTL_SECONDS", DEFAULT_SESSION_TTL_SECONDS);
        let session_ttl_seconds = if (1..=MAX_SESSION_TTL_SECONDS).contains(&session_ttl_seconds) {
            session_ttl_seconds
        } else {
            warn!(
                value = session_ttl_seconds,
                max = MAX_SESSION_TTL_SECONDS,
                "SESSION_TTL_SECONDS out of range, using default"
            );
            DEFAULT_SESSION_TTL_SECONDS
        };

        let purge_seconds = parse_or(
            &lookup,
            "SESSION_PURGE_INTERVAL_SECONDS",
            DEFAULT_PURGE_INTERVAL_SECONDS,
        );

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            session_secret,
            session_ttl_seconds,
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", false),
            static_dir: lookup("STATIC_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            purge_interval: (purge_seconds > 0).then(|| Duration::from_secs(purge_seconds)),
        }
    }

    /// Saturates instead of panicking when the field was set past chrono's range
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.session_ttl_seconds).unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            session_secret: DEV_SESSION_SECRET.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            purge_interval: Some(Duration::from_secs(DEFAULT_PURGE_INTERVAL_SECONDS)),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Unparseable config value, using default");
            default
        }),
        None => default,
    }
}
