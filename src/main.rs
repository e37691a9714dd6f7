//! ЛА-ЛА-ГЕЙМ backend entrypoint wiring the REST routes to the SQLite store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lala_game_back::{
    catalog,
    config::AppConfig,
    dao::{
        game_store::{
            GameStore,
            sqlite::{SqliteConfig, SqliteGameStore},
        },
        storage::StorageError,
    },
    routes,
    services::{question_service, storage_supervisor},
    state::{AppState, SharedState},
};

const DEFAULT_PORT: u16 = 5555;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let questions = catalog::load().context("loading question catalog")?;
    let db_config = SqliteConfig::from_env().context("reading database settings")?;
    info!(questions = questions.len(), "question catalog loaded");

    let app_state = AppState::new(config);

    tokio::spawn(storage_supervisor::run(app_state.clone(), move || {
        let db_config = db_config.clone();
        let questions = questions.clone();
        async move {
            let store = SqliteGameStore::connect(db_config).await?;
            question_service::seed_catalog(&store, questions).await?;
            Ok::<_, StorageError>(Arc::new(store) as Arc<dyn GameStore>)
        }
    }));

    let app = build_router(app_state.clone());

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    if let Some(store) = app_state.clear_game_store().await {
        store.close().await;
    }
    info!("server stopped");

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
