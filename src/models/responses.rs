//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct AllStatsResponse {
    /// Statistics keyed by domain name
    pub domains: BTreeMap<String, CacheStats>,
}

/// Response body for GET /domains/:domain/stats
#[derive(Debug, Clone, Serialize)]
pub struct DomainStatsResponse {
    pub domain: String,
    #[serde(flatten)]
    pub stats: CacheStats,
}

impl DomainStatsResponse {
    pub fn new(domain: impl Into<String>, stats: CacheStats) -> Self {
        Self {
            domain: domain.into(),
            stats,
        }
    }
}

/// Response body for DELETE /domains/:domain/tags/:tag
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub domain: String,
    pub tag: String,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(domain: impl Into<String>, tag: impl Into<String>, removed: usize) -> Self {
        Self {
            domain: domain.into(),
            tag: tag.into(),
            removed,
        }
    }
}

/// Response body for POST /domains/:domain/cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    pub domain: String,
    /// Number of expired entries swept
    pub removed: usize,
}

impl CleanupResponse {
    pub fn new(domain: impl Into<String>, removed: usize) -> Self {
        Self {
            domain: domain.into(),
            removed,
        }
    }
}

/// Response body for DELETE /domains/:domain
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    pub domain: String,
}

impl ClearResponse {
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            message: format!("Domain '{}' cleared", domain),
            domain,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
