//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default cache server address
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache server connection URL
    pub redis_url: String,
    /// Seconds between supervisor health checks
    pub health_check_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Cache server URL (default: redis://127.0.0.1:6379)
    /// - `HEALTH_CHECK_INTERVAL` - Health check frequency in seconds (default: 5, zero is ignored)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            health_check_interval: env::var("HEALTH_CHECK_INTERVAL")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(5),
        }
    }

    /// Health check interval as a Duration.
    pub fn health_check_period(&self) -> Duration {
        Duration::from_secs(self.health_check_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            health_check_interval: 5,
        }
    }
}
