use axum::Router;

use crate::state::SharedState;

pub mod cells;
pub mod config;
pub mod docs;
pub mod extract;
pub mod game;
pub mod health;
pub mod players;
pub mod questions;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(config::router())
        .merge(game::router())
        .merge(questions::router())
        .merge(cells::router())
        .merge(players::router())
        .merge(docs::router())
        .with_state(state)
}
