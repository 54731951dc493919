//! Web dashboard module.
//!
//! Provides:
//! - HTTP Basic Auth middleware guarding every route
//! - Paginated, read-only table views for each tab
//! - JSON statistics for groups and senders

pub mod middleware;
pub mod routes;
pub mod templates;

pub use middleware::AppState;
pub use routes::dashboard_router;
