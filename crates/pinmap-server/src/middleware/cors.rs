// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "content-type";

fn put_cors_headers(response: &mut Response, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        response
            .headers_mut()
            .insert("access-control-allow-origin", value);
    }
    response.headers_mut().insert(
        "access-control-allow-credentials",
        HeaderValue::from_static("true"),
    );
    response
        .headers_mut()
        .insert("vary", HeaderValue::from_static("origin"));
}

/// Browser access for the dev frontend. One configured origin; preflights
/// are answered here without reaching the handlers.
pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        put_cors_headers(&mut response, &state.api.cors_origin);
        response.headers_mut().insert(
            "access-control-allow-methods",
            HeaderValue::from_static(ALLOW_METHODS),
        );
        response.headers_mut().insert(
            "access-control-allow-headers",
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        return response;
    }
    let mut response = next.run(request).await;
    put_cors_headers(&mut response, &state.api.cors_origin);
    response
}
