//! Middleware module
//!
//! Request logging and rate limiting layers

pub mod logging;
pub mod rate_limit;

pub use logging::request_logging_middleware;
pub use rate_limit::{rate_limit_middleware, RateDecision, RateLimiter};
