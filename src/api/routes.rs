//! API Routes
//!
//! Configures the Axum router with all admin endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, domain_stats_handler, health_handler, invalidate_tag_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /stats` - Statistics for every domain
/// - `GET /domains/:domain/stats` - Statistics for one domain
/// - `DELETE /domains/:domain/tags/:tag` - Invalidate entries by tag
/// - `POST /domains/:domain/cleanup` - Sweep expired entries now
/// - `DELETE /domains/:domain` - Clear a domain
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/domains/:domain", delete(clear_handler))
        .route("/domains/:domain/stats", get(domain_stats_handler))
        .route("/domains/:domain/cleanup", post(cleanup_handler))
        .route("/domains/:domain/tags/:tag", delete(invalidate_tag_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
