use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tokio::time::sleep;
use tracing::debug;

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
};

struct RetryPolicy;

impl RetryPolicy {
    const MAX_ATTEMPTS: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 250;

    fn initial_delay() -> Duration {
        Duration::from_millis(Self::INITIAL_DELAY_MS)
    }

    fn next_delay(current: Duration) -> Duration {
        (current * 2).min(Duration::from_secs(5))
    }
}

/// Open the connection pool described by `config`, retrying the first connection.
pub async fn establish_pool(config: &SqliteConfig) -> SqliteResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|source| SqliteDaoError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.effective_max_connections())
        .acquire_timeout(config.acquire_timeout);
    if config.is_in_memory() {
        // Dropping the only connection would drop the whole database.
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let mut attempts = 0;
    let mut delay = RetryPolicy::initial_delay();

    loop {
        match pool_options.clone().connect_with(options.clone()).await {
            Ok(pool) => return Ok(pool),
            Err(err) => {
                attempts += 1;
                if attempts >= RetryPolicy::MAX_ATTEMPTS {
                    return Err(SqliteDaoError::Connect {
                        url: config.url.clone(),
                        attempts,
                        source: err,
                    });
                }
                debug!(attempts, error = %err, "SQLite connection attempt failed; retrying");
                sleep(delay).await;
                delay = RetryPolicy::next_delay(delay);
            }
        }
    }
}
