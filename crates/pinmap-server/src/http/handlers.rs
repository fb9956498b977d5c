// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use pinmap_api::{
    ApiError, ApiErrorCode, CreateAddressBody, DeleteResponseDto, ProcessResponseDto,
    UpdateAddressBody,
};
use pinmap_geocode::{run_process_job, HttpGeocoder, ProcessOptions};
use pinmap_model::AddressId;
use pinmap_store::{StoreError, StoreErrorCode};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{error, info};

pub(crate) fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    (status, Json(json!({"error": err}))).into_response()
}

fn store_error_response(route: &str, err: &StoreError) -> Response {
    let (status, code) = match err.code {
        StoreErrorCode::NotFound => (StatusCode::NOT_FOUND, ApiErrorCode::NotFound),
        StoreErrorCode::Validation => (StatusCode::BAD_REQUEST, ApiErrorCode::InvalidBody),
        StoreErrorCode::Io | StoreErrorCode::Corrupt => {
            (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorCode::IoError)
        }
    };
    if status.is_server_error() {
        error!(route, error = %err, "store operation failed");
    }
    api_error_response(
        status,
        ApiError::new(code, err.message.clone(), json!({"code": err.code.as_str()})),
    )
}

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

// The collection mutates; clients must revalidate on every request and
// get a 304 when the etag still matches.
fn put_cache_headers(headers: &mut HeaderMap, etag: &str) {
    headers.insert("cache-control", HeaderValue::from_static("no-cache"));
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

pub(crate) async fn landing_handler(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let resp = Json(json!({
        "status": "ok",
        "message": "Pinmap API",
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION
    }))
    .into_response();
    state
        .metrics
        .observe_request("/", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let resp = (StatusCode::OK, "ok").into_response();
    state
        .metrics
        .observe_request("/healthz", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.render_text().await;
    ([("content-type", "text/plain; charset=utf-8")], body)
}

pub(crate) async fn list_addresses_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let records = match state.store.list() {
        Ok(v) => v,
        Err(e) => {
            let resp = store_error_response("/api/addresses", &e);
            state
                .metrics
                .observe_request(
                    "/api/addresses",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    started.elapsed(),
                )
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let body = match serde_json::to_vec(&records) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(
                    ApiErrorCode::Internal,
                    "json serialization failed",
                    json!({"message": e.to_string()}),
                ),
            );
            state
                .metrics
                .observe_request(
                    "/api/addresses",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    started.elapsed(),
                )
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let etag = format!("\"{}\"", sha256_hex(&body));
    if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(resp.headers_mut(), &etag);
        state
            .metrics
            .observe_request("/api/addresses", StatusCode::NOT_MODIFIED, started.elapsed())
            .await;
        return with_request_id(resp, &request_id);
    }
    let mut resp = (
        StatusCode::OK,
        [("content-type", "application/json")],
        body,
    )
        .into_response();
    put_cache_headers(resp.headers_mut(), &etag);
    state
        .metrics
        .observe_request("/api/addresses", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn create_address_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateAddressBody>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let candidate = match body.into_candidate() {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(
                StatusCode::BAD_REQUEST,
                ApiError::invalid_body(e.to_string()),
            );
            state
                .metrics
                .observe_request("/api/addresses", StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    match state.store.create(candidate) {
        Ok(record) => {
            info!(request_id = %request_id, id = %record.id, name = %record.name, "address created");
            let resp = (StatusCode::CREATED, Json(record)).into_response();
            state
                .metrics
                .observe_request("/api/addresses", StatusCode::CREATED, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(e) => {
            let resp = store_error_response("/api/addresses", &e);
            state
                .metrics
                .observe_request(
                    "/api/addresses",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    started.elapsed(),
                )
                .await;
            with_request_id(resp, &request_id)
        }
    }
}

pub(crate) async fn update_address_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<UpdateAddressBody>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let patch = body.into_patch();
    match state.store.update(AddressId::new(id), &patch) {
        Ok(record) => {
            info!(request_id = %request_id, id = %record.id, "address updated");
            let resp = Json(record).into_response();
            state
                .metrics
                .observe_request("/api/addresses/{id}", StatusCode::OK, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(e) => {
            let status = match e.code {
                StoreErrorCode::NotFound => StatusCode::NOT_FOUND,
                StoreErrorCode::Validation => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let resp = store_error_response("/api/addresses/{id}", &e);
            state
                .metrics
                .observe_request("/api/addresses/{id}", status, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
    }
}

pub(crate) async fn delete_address_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    match state.store.delete(AddressId::new(id)) {
        Ok(()) => {
            info!(request_id = %request_id, id, "address deleted");
            let resp = Json(DeleteResponseDto {
                message: "Address deleted successfully".to_string(),
            })
            .into_response();
            state
                .metrics
                .observe_request("/api/addresses/{id}", StatusCode::OK, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(e) => {
            let status = match e.code {
                StoreErrorCode::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let resp = store_error_response("/api/addresses/{id}", &e);
            state
                .metrics
                .observe_request("/api/addresses/{id}", status, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
    }
}

pub(crate) async fn process_addresses_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let route = "/api/addresses/process";
    if !state.api.enable_process_endpoint {
        let resp = api_error_response(
            StatusCode::NOT_FOUND,
            ApiError::new(
                ApiErrorCode::NotFound,
                "process endpoint disabled",
                json!({}),
            ),
        );
        state
            .metrics
            .observe_request(route, StatusCode::NOT_FOUND, started.elapsed())
            .await;
        return with_request_id(resp, &request_id);
    }
    if !state.paths.raw_path.exists() {
        let resp = api_error_response(
            StatusCode::NOT_FOUND,
            ApiError::new(
                ApiErrorCode::NotFound,
                "raw address file not found",
                json!({"path": state.paths.raw_path.display().to_string()}),
            ),
        );
        state
            .metrics
            .observe_request(route, StatusCode::NOT_FOUND, started.elapsed())
            .await;
        return with_request_id(resp, &request_id);
    }
    let geocoder = match HttpGeocoder::from_env() {
        Ok(v) => v,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "geocoder unavailable");
            let resp = api_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(
                    ApiErrorCode::GeocodingFailed,
                    e.message,
                    json!({"code": e.code.as_str()}),
                ),
            );
            state
                .metrics
                .observe_request(route, StatusCode::INTERNAL_SERVER_ERROR, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let options = ProcessOptions {
        input_path: state.paths.raw_path.clone(),
        csv_path: state.paths.csv_path.clone(),
        failed_path: state.paths.failed_path.clone(),
        append: false,
    };
    let job = tokio::task::spawn_blocking(move || run_process_job(&options, &geocoder)).await;
    match job {
        Ok(Ok(report)) => {
            info!(
                request_id = %request_id,
                processed = report.processed,
                successful = report.successful,
                failed = report.failed.len(),
                "process job finished"
            );
            let resp = Json(ProcessResponseDto {
                message: "Addresses processed successfully".to_string(),
                processed: report.processed,
                successful: report.successful,
                failed: report.failed,
            })
            .into_response();
            state
                .metrics
                .observe_request(route, StatusCode::OK, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Ok(Err(e)) => {
            error!(request_id = %request_id, error = %e, "process job failed");
            let resp = api_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(
                    ApiErrorCode::GeocodingFailed,
                    e.message,
                    json!({"code": e.code.as_str()}),
                ),
            );
            state
                .metrics
                .observe_request(route, StatusCode::INTERNAL_SERVER_ERROR, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "process task panicked");
            let resp = api_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(ApiErrorCode::Internal, "process task failed", json!({})),
            );
            state
                .metrics
                .observe_request(route, StatusCode::INTERNAL_SERVER_ERROR, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
    }
}
