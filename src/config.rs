use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub simulated_latency: Duration,
    pub session_ttl: chrono::Duration,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            simulated_latency: Duration::from_millis(2000),
            session_ttl: chrono::Duration::minutes(60),
            rate_limit_max_requests: 30,
            rate_limit_window: Duration::from_secs(60),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| {
            let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
            format!("0.0.0.0:{}", port)
        });

        let latency_ms: u64 = parse_or(&lookup, "SIMULATED_LATENCY_MS", 2000)?;
        let ttl_minutes: i64 = parse_or(&lookup, "SESSION_TTL_MINUTES", 60)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_MINUTES",
                value: ttl_minutes.to_string(),
            });
        }
        let max_requests: usize = parse_or(&lookup, "RATE_LIMIT_MAX_REQUESTS", 30)?;
        let window_secs: u64 = parse_or(&lookup, "RATE_LIMIT_WINDOW_SECS", 60)?;

        Ok(Self {
            bind_addr,
            simulated_latency: Duration::from_millis(latency_ms),
            session_ttl: chrono::Duration::minutes(ttl_minutes),
            rate_limit_max_requests: max_requests,
            rate_limit_window: Duration::from_secs(window_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
