//! Request logging middleware.
//!
//! Logs every HTTP request with method, path, status code, and latency.

use axum::{body::Body, extract::Request, http::Response, middleware::Next};
use std::time::Instant;
use tracing::{info, warn};

/// Middleware that logs HTTP requests with timing information.
///
/// INFO for successes, WARN for 4xx/5xx. Health checks are skipped to reduce
/// noise.
pub async fn request_logging(request: Request, next: Next) -> Response<Body> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if path == "/api/health" {
        return next.run(request).await;
    }

    let start = Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        warn!(%method, %path, %status, latency_ms, "request failed");
    } else {
        info!(%method, %path, %status, latency_ms, "request");
    }

    response
}
