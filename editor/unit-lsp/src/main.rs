//! Unit file Language Server executable
//!
//! Speaks LSP over stdio. Logs go to stderr.

use anyhow::{Context, Result};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use unit_lsp::{EngineConfig, LspServer};
use unitsense::Engine;

#[tokio::main]
async fn main() -> Result<()> {
    // Log level from the working directory's config unless RUST_LOG is set
    let config = std::env::current_dir()
        .map(|dir| EngineConfig::load_default(&dir))
        .unwrap_or_else(|_| EngineConfig::new());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.engine.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting {}", config.engine.name);

    let engine = Engine::builtin().context("Failed to load built-in catalog")?;

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| LspServer::with_config(client, engine, config));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
