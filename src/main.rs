// This is the entry point of the suggestion board server.
//
// **Architecture Overview:**
// - `core/` = Business logic (filtering, moderation, voting)
// - `infra/` = Implementations of core traits (in-memory stores)
// - `web/` = HTTP adapters (routes, identity, error mapping)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Seed the board
// 4. Serve HTTP until a shutdown signal arrives

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "web/web_layer.rs"]
mod web;

mod config;

use crate::config::BoardConfig;
use crate::core::board::SuggestionBoard;
use crate::core::clock::SystemClock;
use crate::core::filter::WordFilter;
use crate::core::moderation::ModerationGate;
use crate::core::voting::VotingService;
use crate::infra::moderation::InMemoryBanStore;
use crate::infra::voting::InMemoryItemStore;
use crate::web::AppState;
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = BoardConfig::from_env().context("Invalid board configuration")?;

    tracing::info!(
        kind = ?config.kind,
        port = config.port,
        ban_window_secs = config.moderation.ban_window.num_seconds(),
        ballot = ?config.voting.ballot,
        percent = ?config.voting.percent,
        order = ?config.voting.order,
        banned_words = config.banned_words.len(),
        "Loaded board configuration"
    );

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let filter = WordFilter::new(&config.leet_table, &config.banned_words);
    let gate = ModerationGate::new(
        InMemoryBanStore::new(),
        filter,
        config.moderation.clone(),
        Arc::new(SystemClock),
    );
    let voting = VotingService::new(InMemoryItemStore::new(), config.voting);
    let board = Arc::new(SuggestionBoard::new(gate, voting));

    let seeded = board
        .seed(config.kind.seeds().iter().map(|s| s.to_string()))
        .await
        .context("Failed to seed board")?;
    tracing::info!(seeded, "Seeded board");

    let state = Arc::new(AppState {
        board,
        kind: config.kind,
    });

    // ========================================================================
    // HTTP SERVER
    // ========================================================================

    let app = web::router(state, config.admin_reset_enabled);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Server listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
