//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Statistics for every cache domain
//! - `GET /domains/:domain/stats` - Statistics for one domain
//! - `DELETE /domains/:domain/tags/:tag` - Invalidate entries by tag
//! - `POST /domains/:domain/cleanup` - Sweep expired entries
//! - `DELETE /domains/:domain` - Clear a domain

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
