//! SQLite implementation of [`GameStore`](crate::dao::game_store::GameStore).

mod config;
mod connection;
mod error;
mod models;
mod schema;
mod store;

pub use config::SqliteConfig;
pub use error::{SqliteDaoError, SqliteResult};
pub use store::SqliteGameStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        let message = err.to_string();
        if err.is_pool_timeout() {
            StorageError::exhausted(message, err)
        } else {
            StorageError::unavailable(message, err)
        }
    }
}
