// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]

use pinmap_geocode::{run_process_job, HttpGeocoder, ProcessOptions};
use pinmap_server::{build_router, ApiConfig, AppState, DataPaths};
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => matches!(raw.trim(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Populate the CSV from the raw address file when the store does not exist
/// yet. Geocoder failures are logged and the server still comes up.
fn run_startup_process(paths: &DataPaths) {
    if paths.csv_path.exists() || !paths.raw_path.exists() {
        return;
    }
    info!(raw = %paths.raw_path.display(), "address store missing, processing raw addresses");
    let geocoder = match HttpGeocoder::from_env() {
        Ok(g) => g,
        Err(e) => {
            warn!(error = %e, "skipping startup processing");
            return;
        }
    };
    let options = ProcessOptions {
        input_path: paths.raw_path.clone(),
        csv_path: paths.csv_path.clone(),
        failed_path: paths.failed_path.clone(),
        append: false,
    };
    match run_process_job(&options, &geocoder) {
        Ok(report) => info!(
            processed = report.processed,
            successful = report.successful,
            failed = report.failed.len(),
            "startup processing finished"
        ),
        Err(e) => error!(error = %e, "startup processing failed"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let bind = env_string("PINMAP_BIND", "0.0.0.0:8000");
    let data_dir = env_string("PINMAP_DATA_DIR", "data");
    let api = ApiConfig {
        cors_origin: env_string("PINMAP_CORS_ORIGIN", "http://localhost:5173"),
        max_body_bytes: usize::try_from(env_u64("PINMAP_MAX_BODY_BYTES", 64 * 1024))?,
        enable_process_endpoint: env_bool("PINMAP_ENABLE_PROCESS", true),
    };

    std::fs::create_dir_all(&data_dir)?;
    let paths = DataPaths::in_dir(&data_dir);
    run_startup_process(&paths);

    let state = AppState::new(paths, api);
    let router = build_router(state);

    let addr: SocketAddr = bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "pinmap server listening");
    axum::serve(listener, router).await?;
    Ok(())
}
