use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod config;
mod error;
mod model;
mod predict;

use api::AppState;
use config::Config;
use model::{locator, TrainedModel};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let model = load_model(&config)?;

    let state = AppState {
        model,
        home_bonus: config.home_bonus,
        default_best_of: config.default_best_of,
    };
    let app = api::router(state);
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr))?;
    info!("Prediction API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

/// Locate and load the trained model, failing fast unless a missing model
/// was explicitly allowed.
fn load_model(config: &Config) -> Result<Option<Arc<TrainedModel>>> {
    let candidates = if config.model_search_paths.is_empty() {
        locator::default_candidates()
    } else {
        config.model_search_paths.clone()
    };

    match locator::locate(config.model_path.as_deref(), &candidates) {
        Ok(path) => {
            let model = TrainedModel::load(&path)
                .with_context(|| format!("Failed to load model from {}", path.display()))?;
            Ok(Some(Arc::new(model)))
        }
        Err(e) if config.allow_missing_model => {
            warn!("Starting without a trained model: {}", e);
            Ok(None)
        }
        Err(e) => Err(e).context("No trained model artifact; pass --allow-missing-model to run rating-only"),
    }
}
