//! Storage failures as seen by the service layer, independent of the database in use.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

type BackendError = Box<dyn StdError + Send + Sync>;

/// Broad category of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// The database rejected the statement or could not be reached.
    Unavailable,
    /// Every pooled connection stayed busy past the acquire timeout.
    Exhausted,
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageErrorKind::Unavailable => "storage unavailable",
            StorageErrorKind::Exhausted => "storage busy",
        })
    }
}

/// Failure reported by a [`GameStore`](crate::dao::game_store::GameStore) implementation.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
    #[source]
    source: BackendError,
}

impl StorageError {
    fn new(
        kind: StorageErrorKind,
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn unavailable(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::new(StorageErrorKind::Unavailable, message, source)
    }

    pub fn exhausted(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::new(StorageErrorKind::Exhausted, message, source)
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }
}
