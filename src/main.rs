use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use anyhow::anyhow;

use voxlate_gateway::{routes, AppState, ServerConfig};

/// Voxlate Gateway - audio translation server
#[derive(Parser, Debug)]
#[command(name = "voxlate-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ServerConfig::from_file(path),
        None => ServerConfig::from_env(),
    }
    .map_err(|e| anyhow!("configuration error: {e}"))?;

    let cors = build_cors_layer(&config)?;
    let address = config.address();

    let state = Arc::new(AppState::new(config).map_err(|e| anyhow!("startup failed: {e}"))?);

    let app = routes::create_api_router().layer(cors).with_state(state);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow!("failed to bind {address}: {e}"))?;
    info!(address = address.as_str(), "voxlate-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// CORS policy from configuration: any origin unless an explicit
/// comma-separated list is set.
fn build_cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    match config.cors_allowed_origins.as_deref() {
        None | Some("*") => Ok(layer.allow_origin(Any)),
        Some(origins) => {
            let origins = origins
                .split(',')
                .map(|origin| {
                    origin
                        .trim()
                        .parse::<HeaderValue>()
                        .map_err(|e| anyhow!("invalid CORS origin {origin}: {e}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(layer.allow_origin(AllowOrigin::list(origins)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
