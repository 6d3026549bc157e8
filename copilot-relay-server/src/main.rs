//! Copilot Relay Server - Headless Daemon
//!
//! Resolves the upstream accounts from `config.yaml`, picks the active one and
//! serves the HTTP surface behind the proxy auth gate.
//!
//! Access via: http://localhost:4141

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::Cli;
use copilot_relay_core::{AccountStore, AuthGate};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Copilot Relay starting on port {}...", cli.port);

    let store = AccountStore::from_env();
    let gate = Arc::new(AuthGate::from_env());
    let state = AppState::bootstrap(&store, cli.account.as_deref(), gate)
        .context("Failed to start Copilot Relay")?;
    info!("👤 Active account: {}", state.active_account().id());

    let app = router::build_router(state);
    let listener = server_utils::create_listener(&cli.host, cli.port).await?;

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    Ok(())
}
