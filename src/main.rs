use std::sync::Arc;

use anyhow::{Context, Result};
use routefinder::{RouterConfig, network, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RouterConfig::load()?;
    telemetry::init(&config.logging)?;

    let graph = network::load(&config.network).context("Failed to load network")?;
    tracing::info!(
        version = routefinder::VERSION,
        nodes = ?graph.nodes().collect::<Vec<_>>(),
        "Starting route finder"
    );

    web::run(&config.server, Arc::new(graph)).await
}
