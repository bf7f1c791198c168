//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::MAX_TTL;

// == Defaults ==
pub const DEFAULT_MAX_SIZE: usize = 1000;
pub const DEFAULT_MAX_MEMORY_MB: u64 = 50;
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_COMPRESSION_THRESHOLD: usize = 1024;
pub const DEFAULT_WARMUP_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Construction-time settings for a single cache instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of entries before eviction kicks in
    pub max_size: usize,
    /// Advisory memory ceiling in MB; exceeding it is logged, never enforced
    pub max_memory_mb: u64,
    /// TTL applied when a set does not specify one
    pub default_ttl: Duration,
    /// Interval between background expiry sweeps
    pub cleanup_interval: Duration,
    /// Whether large payloads are compressed by default
    pub compression_enabled: bool,
    /// Serialized size in bytes above which payloads are compressed
    pub compression_threshold: usize,
    /// TTL used for entries loaded by warmup
    pub warmup_ttl: Duration,
}

impl CacheConfig {
    /// Replaces zero values with their documented defaults.
    pub fn sanitized(mut self) -> Self {
        if self.max_size == 0 {
            warn!("max_size of 0 is invalid, using {}", DEFAULT_MAX_SIZE);
            self.max_size = DEFAULT_MAX_SIZE;
        }
        if self.max_memory_mb == 0 {
            self.max_memory_mb = DEFAULT_MAX_MEMORY_MB;
        }
        if self.default_ttl.is_zero() {
            warn!("default_ttl of 0 is invalid, using {:?}", DEFAULT_TTL);
            self.default_ttl = DEFAULT_TTL;
        }
        if self.cleanup_interval.is_zero() {
            self.cleanup_interval = DEFAULT_CLEANUP_INTERVAL;
        }
        if self.compression_threshold == 0 {
            self.compression_threshold = DEFAULT_COMPRESSION_THRESHOLD;
        }
        if self.warmup_ttl.is_zero() {
            self.warmup_ttl = DEFAULT_WARMUP_TTL;
        }
        if self.default_ttl > MAX_TTL {
            warn!("default_ttl of {:?} is too large, capping", self.default_ttl);
            self.default_ttl = MAX_TTL;
        }
        if self.warmup_ttl > MAX_TTL {
            warn!("warmup_ttl of {:?} is too large, capping", self.warmup_ttl);
            self.warmup_ttl = MAX_TTL;
        }
        self
    }

    /// Loads cache settings from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE` - Maximum entries per cache (default: 1000)
    /// - `MAX_MEMORY_MB` - Advisory memory ceiling (default: 50)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `COMPRESSION_ENABLED` - `true`/`false` (default: true)
    /// - `COMPRESSION_THRESHOLD` - Bytes (default: 1024)
    /// - `WARMUP_TTL` - Warmup TTL in seconds (default: 1800)
    pub fn from_env() -> Self {
        Self {
            max_size: env_or("MAX_SIZE", DEFAULT_MAX_SIZE),
            max_memory_mb: env_or("MAX_MEMORY_MB", DEFAULT_MAX_MEMORY_MB),
            default_ttl: Duration::from_secs(env_or("DEFAULT_TTL", DEFAULT_TTL.as_secs())),
            cleanup_interval: Duration::from_secs(env_or(
                "CLEANUP_INTERVAL",
                DEFAULT_CLEANUP_INTERVAL.as_secs(),
            )),
            compression_enabled: env_or("COMPRESSION_ENABLED", true),
            compression_threshold: env_or("COMPRESSION_THRESHOLD", DEFAULT_COMPRESSION_THRESHOLD),
            warmup_ttl: Duration::from_secs(env_or("WARMUP_TTL", DEFAULT_WARMUP_TTL.as_secs())),
        }
        .sanitized()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            default_ttl: DEFAULT_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            compression_enabled: true,
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
            warmup_ttl: DEFAULT_WARMUP_TTL,
        }
    }
}

/// Process configuration for the admin server binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings shared by every cache domain
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// `SERVER_PORT` defaults to 3000; see [`CacheConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.max_memory_mb, 50);
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.cleanup_interval, Duration::from_secs(300));
        assert!(config.compression_enabled);
        assert_eq!(config.compression_threshold, 1024);
    }

    #[test]
    fn test_sanitized_replaces_zero_values() {
        let config = CacheConfig {
            max_size: 0,
            max_memory_mb: 0,
            default_ttl: Duration::ZERO,
            cleanup_interval: Duration::ZERO,
            compression_enabled: false,
            compression_threshold: 0,
            warmup_ttl: Duration::ZERO,
        }
        .sanitized();

        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(config.max_memory_mb, DEFAULT_MAX_MEMORY_MB);
        assert_eq!(config.default_ttl, DEFAULT_TTL);
        assert_eq!(config.cleanup_interval, DEFAULT_CLEANUP_INTERVAL);
        assert_eq!(config.compression_threshold, DEFAULT_COMPRESSION_THRESHOLD);
        assert_eq!(config.warmup_ttl, DEFAULT_WARMUP_TTL);
        // Explicit opt-out is preserved
        assert!(!config.compression_enabled);
    }

    #[test]
    fn test_sanitized_caps_huge_ttls() {
        let config = CacheConfig {
            default_ttl: Duration::from_secs(u64::MAX),
            warmup_ttl: Duration::MAX,
            ..CacheConfig::default()
        }
        .sanitized();

        assert_eq!(config.default_ttl, MAX_TTL);
        assert_eq!(config.warmup_ttl, MAX_TTL);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "MAX_SIZE",
            "MAX_MEMORY_MB",
            "DEFAULT_TTL",
            "CLEANUP_INTERVAL",
            "COMPRESSION_ENABLED",
            "COMPRESSION_THRESHOLD",
            "WARMUP_TTL",
            "SERVER_PORT",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.cache, CacheConfig::default());
        assert_eq!(config.server_port, 3000);
    }
}
