//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::config::CacheConfig;
use crate::domains::CacheDomains;
use crate::error::{CacheError, Result};
use crate::models::{
    AllStatsResponse, CleanupResponse, ClearResponse, DomainStatsResponse, HealthResponse,
    InvalidateResponse,
};

/// Application state shared across all handlers.
///
/// Each domain cache is internally synchronized, so the state is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub domains: CacheDomains,
}

impl AppState {
    /// Creates a new AppState around existing domain caches.
    pub fn new(domains: CacheDomains) -> Self {
        Self { domains }
    }

    /// Builds every domain cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(CacheDomains::new(config))
    }
}

/// Handler for GET /stats
///
/// Returns statistics for every domain.
pub async fn stats_handler(State(state): State<AppState>) -> Json<AllStatsResponse> {
    let mut domains = std::collections::BTreeMap::new();
    for (name, cache) in state.domains.iter() {
        domains.insert(name.to_string(), cache.stats().await);
    }

    Json(AllStatsResponse { domains })
}

/// Handler for GET /domains/:domain/stats
pub async fn domain_stats_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<DomainStatsResponse>> {
    let stats = state.domains.get(&domain)?.stats().await;
    Ok(Json(DomainStatsResponse::new(domain, stats)))
}

/// Handler for DELETE /domains/:domain/tags/:tag
///
/// Removes every entry in the domain carrying the tag.
pub async fn invalidate_tag_handler(
    State(state): State<AppState>,
    Path((domain, tag)): Path<(String, String)>,
) -> Result<Json<InvalidateResponse>> {
    if tag.trim().is_empty() {
        return Err(CacheError::InvalidRequest("Tag cannot be empty".to_string()));
    }

    let removed = state.domains.get(&domain)?.invalidate_by_tag(&tag).await;
    info!("Invalidated {} entries tagged '{}' in '{}'", removed, tag, domain);

    Ok(Json(InvalidateResponse::new(domain, tag, removed)))
}

/// Handler for POST /domains/:domain/cleanup
///
/// Runs the expiry sweep immediately instead of waiting for the timer.
pub async fn cleanup_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<CleanupResponse>> {
    let removed = state.domains.get(&domain)?.cleanup().await;
    Ok(Json(CleanupResponse::new(domain, removed)))
}

/// Handler for DELETE /domains/:domain
///
/// Drops every entry in the domain and resets its statistics.
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<ClearResponse>> {
    state.domains.get(&domain)?.clear().await;
    info!("Cleared domain '{}'", domain);
    Ok(Json(ClearResponse::new(domain)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
