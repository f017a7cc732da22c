use std::sync::{Arc, Mutex};

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use gravityfit_catalog::DatasetTable;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub use config::ServiceConfig;

pub mod error;
pub use error::ApiError;

pub mod handlers;

/// Shared request state. The table is immutable after startup; only the
/// sampler behind blank searches needs a lock.
#[derive(Clone)]
pub struct AppState {
    table: Arc<DatasetTable>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(table: DatasetTable, sample_seed: Option<u64>) -> Self {
        let rng = match sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            table: Arc::new(table),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn table(&self) -> &DatasetTable {
        &self.table
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/exoplanets", get(handlers::search_exoplanets))
        .route("/exoplanets/stats", get(handlers::exoplanet_stats))
        .route("/exoplanets/random", get(handlers::first_exoplanets))
        .route("/exoplanets/:name", get(handlers::get_exoplanet))
        .route("/predict", post(handlers::predict))
        .route("/plan", post(handlers::plan))
        .with_state(state)
        .layer(CatchPanicLayer::new())
}

/// Router plus the HTTP middleware the binary runs with.
pub fn build_app(state: AppState, config: &ServiceConfig) -> anyhow::Result<Router> {
    let mut app = router(state);
    if let Some(origin) = &config.frontend_origin {
        let origin: HeaderValue = origin.parse()?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }
    Ok(app.layer(TraceLayer::new_for_http()))
}
