//! Dashboard state and the Basic Auth middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AuthFailure, BasicAuthGate};
use crate::config::Config;
use crate::store::DashboardStore;

/// State shared by dashboard routes
pub struct AppState {
    /// Table data source
    pub store: Arc<dyn DashboardStore>,
    /// Credential check applied to every route
    pub gate: BasicAuthGate,
    /// WhatsApp API base URL for the navigation bar
    pub whatsapp_host: String,
}

impl AppState {
    pub fn new(store: Arc<dyn DashboardStore>, config: &Config) -> Self {
        Self {
            store,
            gate: BasicAuthGate::new(&config.auth),
            whatsapp_host: config.whatsapp_host.clone(),
        }
    }
}

/// Reject requests without valid Basic credentials.
///
/// Failures are expected traffic (browsers probe before prompting), so they
/// are logged at debug level only.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match state.gate.authorize(request.headers()) {
        Ok(_) => next.run(request).await,
        Err(AuthFailure::Missing) => {
            debug!(path = %request.uri().path(), "Missing or malformed credentials");
            state.gate.challenge()
        }
        Err(AuthFailure::Rejected { username }) => {
            debug!(path = %request.uri().path(), %username, "Rejected credentials");
            state.gate.challenge()
        }
    }
}
