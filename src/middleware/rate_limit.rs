//! Rate limiting middleware.
//!
//! Generic fixed-window limiter per client IP, applied in front of the whole
//! API surface.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Fixed-window limiter configuration.
#[derive(Clone)]
pub struct RateLimiterConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 200,
            window: Duration::from_secs(60),
        }
    }
}

/// Per-IP fixed-window request counter.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    state: Arc<Mutex<HashMap<IpAddr, WindowEntry>>>,
}

struct WindowEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count a request from `ip`; returns the retry delay when over limit.
    fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        let mut state = self.state.lock();
        let now = Instant::now();

        let entry = state.entry(ip).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;

        if entry.count > self.config.max_requests {
            let reset_at = entry.window_start + self.config.window;
            Err(reset_at.duration_since(now))
        } else {
            Ok(())
        }
    }

    /// Drop stale windows (call from a background task).
    pub fn cleanup(&self) {
        let mut state = self.state.lock();
        let now = Instant::now();
        let window = self.config.window;

        state.retain(|_, entry| now.duration_since(entry.window_start) < window * 2);
    }
}

/// Rate limiting middleware function.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    match limiter.check(addr.ip()) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(ip = %addr.ip(), retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");

            (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_after.as_secs().to_string())],
                Json(serde_json::json!({ "message": "Too many requests" })),
            )
                .into_response()
        }
    }
}
