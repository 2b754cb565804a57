use crate::config::AppConfig;
use crate::middleware::RateLimiter;
use crate::services::latency::SimulatedLatency;
use crate::services::sessions::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub latency: SimulatedLatency,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let latency = SimulatedLatency::new(config.simulated_latency);
        let limiter = RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window);
        Self {
            config,
            sessions: SessionStore::new(),
            latency,
            limiter,
        }
    }
}

pub type SharedState = Arc<AppState>;
