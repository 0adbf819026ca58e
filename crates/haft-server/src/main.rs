//! haft-server - the bundle registry service
//!
//! Resolves the newest compatible bundle per plugin for a client's
//! runtime version and platform, and serves the built archives
//! byte-for-byte from the cache directory.

use anyhow::Context;
use clap::Parser;
use haft_registry::{FileStore, RegistryConfig};
use haft_server::{AppState, api_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "haft-server")]
#[command(author, version, about = "Registry server for haft plugin bundles", long_about = None)]
struct Cli {
    /// Path to the registry configuration file
    #[arg(default_value = "haft.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = RegistryConfig::load(&cli.config)
        .with_context(|| format!("cannot load registry configuration from {}", cli.config))?;

    let store = FileStore::open(&config.store_path).with_context(|| {
        format!("cannot open record store {}", config.store_path.display())
    })?;
    tracing::info!(
        records = store.len(),
        store = %config.store_path.display(),
        "opened record store"
    );

    let state = AppState {
        store: Arc::new(store),
    };

    let cache_route = config.server.cache_path.trim_end_matches('/').to_string();
    let app = api_router()
        .nest_service(&cache_route, ServeDir::new(&config.cache_directory))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("bad server host/port configuration")?;
    tracing::info!(
        cache = %config.cache_directory.display(),
        cache_path = %cache_route,
        "starting haft-server on http://{addr}"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
