use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gravityfit_catalog::{load_table, locate_dataset, CsvRowSource};
use gravityfit_http::{build_app, AppState, ServiceConfig};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServiceConfig::load()?;

    // The dataset is loaded once; without it the service has nothing to serve.
    let dataset = locate_dataset(&config.dataset_candidates())?;
    let source = CsvRowSource::new(&dataset);
    let table = load_table(&source)
        .await
        .with_context(|| format!("failed to load exoplanet data from {}", dataset.display()))?;

    let state = AppState::new(table, config.sample_seed);
    let app = build_app(state, &config)?;

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, dataset = %dataset.display(), "GravityFit API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
