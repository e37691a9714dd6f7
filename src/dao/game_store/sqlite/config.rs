use std::time::Duration;

use super::error::{SqliteDaoError, SqliteResult};

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration describing how to open the SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl SqliteConfig {
    /// Construct a configuration for the given database URL with default pool settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_POOL_SIZE,
            acquire_timeout: DEFAULT_POOL_TIMEOUT,
        }
    }

    /// Configuration of a private in-memory database, used by tests and demos.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Override the pool size and acquire timeout.
    pub fn with_pool(mut self, max_connections: u32, acquire_timeout: Duration) -> Self {
        self.max_connections = max_connections.max(1);
        self.acquire_timeout = acquire_timeout;
        self
    }

    /// Whether the URL points to a memory database that only lives inside one connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Number of pooled connections actually opened.
    ///
    /// An in-memory database exists per connection, so the pool is pinned to one.
    pub fn effective_max_connections(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections
        }
    }

    /// Build a configuration by reading `DATABASE_URL`, `DB_POOL_SIZE` and `DB_POOL_TIMEOUT`.
    pub fn from_env() -> SqliteResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let max_connections = parse_env("DB_POOL_SIZE")?.unwrap_or(DEFAULT_POOL_SIZE);
        let acquire_timeout = parse_env::<u64>("DB_POOL_TIMEOUT")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POOL_TIMEOUT);

        Ok(Self::new(url).with_pool(max_connections, acquire_timeout))
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str) -> SqliteResult<Option<T>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SqliteDaoError::InvalidEnvVar { var, value }),
        Err(_) => Ok(None),
    }
}
