//! Rate limiting middleware
//!
//! Per-process sliding window keyed by client address. Counters are not
//! shared between instances and reset when the process restarts.

use crate::config::Settings;
use crate::handlers::AppState;
use crate::utils::error::AppError;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Tracked clients above which stale windows are swept
const PRUNE_THRESHOLD: usize = 1024;

/// Upper bound on the time between two sweeps
const MAX_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted; `remaining` more fit in the current window
    Allowed { remaining: u32 },
    /// Request rejected; capacity frees up after `retry_after`
    Limited { retry_after: Duration },
}

#[derive(Debug)]
struct Windows {
    clients: HashMap<String, VecDeque<Instant>>,
    last_prune: Instant,
}

/// Sliding-window log of request instants per client
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<Windows>,
    max_requests: u32,
    window: Duration,
    prune_interval: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(Windows {
                clients: HashMap::new(),
                last_prune: Instant::now(),
            }),
            max_requests,
            window,
            prune_interval: window.min(MAX_PRUNE_INTERVAL),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.security.rate_limit_max, settings.rate_limit_window())
    }

    /// Maximum requests per window
    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Check and record a request for `key` at the current instant
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    /// Check and record a request for `key` at `now`
    ///
    /// Rejected requests are not recorded.
    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        // At most one sweep per prune interval
        if windows.clients.len() > PRUNE_THRESHOLD
            && now.saturating_duration_since(windows.last_prune) >= self.prune_interval
        {
            let window = self.window;
            windows.clients.retain(|_, hits| {
                hits.back()
                    .is_some_and(|last| now.saturating_duration_since(*last) < window)
            });
            windows.last_prune = now;
        }

        let hits = windows.clients.entry(key.to_string()).or_default();
        while let Some(oldest) = hits.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() >= self.max_requests as usize {
            let oldest = hits.front().copied().unwrap_or(now);
            let retry_after = self.window.saturating_sub(now.saturating_duration_since(oldest));
            return RateDecision::Limited { retry_after };
        }

        hits.push_back(now);
        RateDecision::Allowed {
            remaining: self.max_requests - hits.len() as u32,
        }
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).clients.len()
    }
}

/// Rate limiting middleware
///
/// Applies to every route, including the not-found fallback
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let client_id = get_client_identifier(&request);
    let limit = state.rate_limiter.limit();

    match state.rate_limiter.check(&client_id) {
        RateDecision::Allowed { remaining } => {
            debug!("Client {} admitted, {} requests remaining", client_id, remaining);
            let mut response = next.run(request).await;
            set_rate_limit_headers(response.headers_mut(), limit, remaining);
            response
        }
        RateDecision::Limited { retry_after } => {
            warn!("Client {} exceeded rate limit", client_id);
            let retry_after_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            let mut response = AppError::RateLimited {
                retry_after_secs: retry_after_secs.max(1),
            }
            .with_mode(state.settings.is_dev_mode())
            .into_response();
            set_rate_limit_headers(response.headers_mut(), limit, 0);
            response
        }
    }
}

fn set_rate_limit_headers(headers: &mut HeaderMap, limit: u32, remaining: u32) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
}

/// Get client identifier
///
/// Prefers the TCP peer address, then proxy headers, then `"unknown"`.
///
/// Without `ConnectInfo` (router embedded in another host, or served without
/// `into_make_service_with_connect_info`) the key comes from `X-Forwarded-For`
/// or `X-Real-IP`, which clients control: rotating those headers evades the
/// limit unless a trusted proxy in front overwrites them.
pub fn get_client_identifier(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    let headers = request.headers();

    // X-Forwarded-For may contain multiple IPs, take the first one
    if let Some(forwarded_for) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(ip) = forwarded_for.split(',').next().map(str::trim) {
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let ip = real_ip.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    "unknown".to_string()
}
