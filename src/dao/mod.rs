//! Persistence layer: the storage-neutral entities, the [`game_store::GameStore`] seam and
//! its SQLite backend.

pub mod game_store;
pub mod models;
pub mod storage;
