//! HTTP Middleware
//! Mission: Request logging and per-IP rate limiting for the public surface

pub mod logging;
pub mod rate_limit;

pub use logging::request_logging;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
