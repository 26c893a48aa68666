//! Per-IP rate limiting for login and signup routes
//!
//! Fixed one-minute windows per (route, client IP). Counters live in memory
//! and are swept by [`RateLimiter::cleanup`].

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::security_log;
use crate::state::AppState;

/// Requests allowed per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub route: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

pub const LOGIN_QUOTA: Quota = Quota {
    route: "login",
    max_requests: 5,
    window: Duration::from_secs(60),
};

pub const SIGNUP_QUOTA: Quota = Quota {
    route: "signup",
    max_requests: 3,
    window: Duration::from_secs(60),
};

/// Windows idle longer than this are dropped by `cleanup`
const STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy)]
struct Window {
    opened: Instant,
    hits: u32,
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<(&'static str, String), Window>>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request from `client`. `false` once the quota is spent.
    pub async fn allow(&self, quota: Quota, client: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows
            .entry((quota.route, client.to_owned()))
            .or_insert(Window { opened: now, hits: 0 });

        if now.duration_since(window.opened) >= quota.window {
            *window = Window { opened: now, hits: 0 };
        }
        window.hits = window.hits.saturating_add(1);
        window.hits <= quota.max_requests
    }

    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.opened) < STALE_AFTER);
        let removed = before - windows.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = windows.len(), "Rate limiter swept");
        }
    }
}

/// Client IP: first `X-Forwarded-For` hop, then the socket peer.
fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn enforce(state: &AppState, quota: Quota, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);
    if state.rate_limiter.allow(quota, &ip).await {
        return next.run(request).await;
    }
    security_log!("WARN", "rate_limited", route = quota.route, ip = ip.as_str());
    AppError::new(ErrorCode::TooManyAttempts)
        .with_detail("retry_after_secs", quota.window.as_secs())
        .into_response()
}

pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, LOGIN_QUOTA, request, next).await
}

pub async fn signup_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, SIGNUP_QUOTA, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn test_quota_is_enforced() {
        let limiter = RateLimiter::new();
        for _ in 0..LOGIN_QUOTA.max_requests {
            assert!(limiter.allow(LOGIN_QUOTA, "10.0.0.1").await);
        }
        assert!(!limiter.allow(LOGIN_QUOTA, "10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_windows_are_per_client_and_route() {
        let limiter = RateLimiter::new();
        for _ in 0..SIGNUP_QUOTA.max_requests {
            assert!(limiter.allow(SIGNUP_QUOTA, "10.0.0.1").await);
        }
        assert!(!limiter.allow(SIGNUP_QUOTA, "10.0.0.1").await);
        assert!(limiter.allow(SIGNUP_QUOTA, "10.0.0.2").await);
        assert!(limiter.allow(LOGIN_QUOTA, "10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_window_reopens() {
        let limiter = RateLimiter::new();
        let quota = Quota {
            route: "test",
            max_requests: 1,
            window: Duration::ZERO,
        };
        assert!(limiter.allow(quota, "ip").await);
        assert!(limiter.allow(quota, "ip").await);
    }

    #[tokio::test]
    async fn test_cleanup_keeps_fresh_windows() {
        let limiter = RateLimiter::new();
        limiter.allow(LOGIN_QUOTA, "ip").await;
        limiter.cleanup().await;
        assert_eq!(limiter.windows.lock().await.len(), 1);
    }

    #[test]
    fn test_client_ip_sources() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "203.0.113.7");

        let mut request = Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 9], 4000))));
        assert_eq!(client_ip(&request), "192.0.2.9");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), "unknown");
    }
}
