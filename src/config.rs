//! Environment-driven service configuration.

use std::env;
use std::time::Duration;

use crate::ephemeris::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::store::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};

/// Configuration for the service, read once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP surface binds to.
    pub bind_addr: String,
    /// Horizons API endpoint.
    pub horizons_base_url: String,
    /// Path of the SQLite ledger file.
    pub db_path: String,
    /// Time-to-live for both memory caches.
    pub cache_ttl: Duration,
    /// Entry bound for both memory caches.
    pub cache_capacity: usize,
    /// Bound on a single Horizons round trip.
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            horizons_base_url: DEFAULT_BASE_URL.to_string(),
            db_path: "panchanga.db".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ServiceConfig {
    /// Build from the environment, falling back to defaults field by field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_string("PANCHANGA_BIND_ADDR", defaults.bind_addr),
            horizons_base_url: env_string("HORIZONS_BASE_URL", defaults.horizons_base_url),
            db_path: env_string("PANCHANGA_DB", defaults.db_path),
            cache_ttl: Duration::from_secs(env_u64(
                "PANCHANGA_CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
            cache_capacity: env_u64("PANCHANGA_CACHE_CAPACITY", defaults.cache_capacity as u64)
                as usize,
            request_timeout: Duration::from_secs(env_u64(
                "HORIZONS_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServiceConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(43_200));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.horizons_base_url.starts_with("https://"));
    }
}
