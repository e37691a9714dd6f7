//! Error types shared by the SQLite storage implementation.

use thiserror::Error;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with SQLite.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value `{value}` for environment variable `{var}`")]
    InvalidEnvVar { var: &'static str, value: String },
    /// The database URL could not be parsed into connection options.
    #[error("invalid SQLite database URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    /// The pool could not open its first connection.
    #[error("failed to connect to SQLite database `{url}` after {attempts} attempts")]
    Connect {
        url: String,
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
    /// Creating a table or an index failed.
    #[error("failed to ensure schema object `{object}`")]
    EnsureSchema {
        object: &'static str,
        #[source]
        source: sqlx::Error,
    },
    /// A statement issued by a store operation failed.
    #[error("failed to {operation}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
    /// Beginning or committing a transaction failed.
    #[error("transaction failed while trying to {operation}")]
    Transaction {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
    /// The periodic health ping failed.
    #[error("SQLite health ping failed")]
    HealthPing {
        #[source]
        source: sqlx::Error,
    },
}

impl SqliteDaoError {
    /// Build a closure mapping a statement failure to [`SqliteDaoError::Query`].
    pub fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| SqliteDaoError::Query { operation, source }
    }

    /// Build a closure mapping a transaction failure to [`SqliteDaoError::Transaction`].
    pub fn transaction(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| SqliteDaoError::Transaction { operation, source }
    }

    /// Whether the failure comes from the pool running out of connections.
    pub fn is_pool_timeout(&self) -> bool {
        let source = match self {
            SqliteDaoError::Query { source, .. }
            | SqliteDaoError::Transaction { source, .. }
            | SqliteDaoError::HealthPing { source } => source,
            _ => return false,
        };
        matches!(source, sqlx::Error::PoolTimedOut)
    }
}
