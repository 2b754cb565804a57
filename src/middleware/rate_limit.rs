//! In-memory per-IP rate limiter for the evaluation endpoints.
use crate::web::error::ApiError;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Identifier count above which `check` sweeps expired entries itself
/// instead of waiting for the scheduled `cleanup`.
const INLINE_SWEEP_THRESHOLD: usize = 1024;

/// Sliding-window request counter keyed by client IP.
#[derive(Clone)]
pub struct RateLimiter {
    hits: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            hits: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Records a request for `client` and reports whether it is within the limit.
    pub async fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.write().await;

        if hits.len() >= INLINE_SWEEP_THRESHOLD && !hits.contains_key(client) {
            self.sweep(&mut hits, now);
        }

        let recent = hits.entry(client.to_string()).or_default();
        recent.retain(|&at| now.duration_since(at) < self.window);
        if recent.len() >= self.max_requests {
            return false;
        }
        recent.push(now);
        true
    }

    /// Forgets clients with no requests inside the window.
    pub async fn cleanup(&self) {
        let mut hits = self.hits.write().await;
        self.sweep(&mut hits, Instant::now());
        tracing::debug!("Rate limiter cleanup: {} clients tracked", hits.len());
    }

    fn sweep(&self, hits: &mut HashMap<String, Vec<Instant>>, now: Instant) {
        hits.retain(|_, recent| {
            recent.retain(|&at| now.duration_since(at) < self.window);
            !recent.is_empty()
        });
    }
}

pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = addr.ip().to_string();
    if !limiter.check(&client).await {
        tracing::warn!(%client, "Rate limit exceeded on evaluation endpoint");
        return ApiError::RateLimited.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_applies_per_client() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));

        for _ in 0..3 {
            assert!(limiter.check("10.0.0.1").await);
        }
        assert!(!limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_window_expiry_frees_client() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(limiter.check("10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_cleanup_drops_expired_clients() {
        let limiter = RateLimiter::new(5, Duration::from_millis(50));
        limiter.check("ip1").await;
        limiter.check("ip2").await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        limiter.cleanup().await;

        assert!(limiter.hits.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_new_clients_sweep_a_full_map() {
        let limiter = RateLimiter::new(5, Duration::from_millis(50));
        for n in 0..INLINE_SWEEP_THRESHOLD {
            limiter.check(&format!("client-{n}")).await;
        }
        assert_eq!(limiter.hits.read().await.len(), INLINE_SWEEP_THRESHOLD);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(limiter.check("late-client").await);
        assert_eq!(limiter.hits.read().await.len(), 1);
    }
}
