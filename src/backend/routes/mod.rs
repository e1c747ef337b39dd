//! Route Configuration Module
//!
//! - **`router`** - Main router creation, health check, fallback, tracing
//! - **`api_routes`** - `/api/*` endpoints

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
