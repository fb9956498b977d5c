#![forbid(unsafe_code)]
//! Pinmap HTTP API: CRUD over the address collection plus the batch
//! geocoding trigger, served with axum.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use pinmap_store::CsvAddressStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod metrics;
mod middleware;

pub use config::{ApiConfig, DataPaths, CONFIG_SCHEMA_VERSION};
pub use metrics::RequestMetrics;

pub const CRATE_NAME: &str = "pinmap-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CsvAddressStore>,
    pub paths: DataPaths,
    pub api: ApiConfig,
    pub metrics: Arc<RequestMetrics>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(paths: DataPaths, api: ApiConfig) -> Self {
        Self {
            store: Arc::new(CsvAddressStore::new(&paths.csv_path)),
            paths,
            api,
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::landing_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route(
            "/api/addresses",
            get(http::handlers::list_addresses_handler)
                .post(http::handlers::create_address_handler),
        )
        .route(
            "/api/addresses/:id",
            patch(http::handlers::update_address_handler)
                .delete(http::handlers::delete_address_handler),
        )
        .route(
            "/api/addresses/process",
            post(http::handlers::process_addresses_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::cors::cors_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
