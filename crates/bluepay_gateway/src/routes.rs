// --- File: crates/bluepay_gateway/src/routes.rs ---

use axum::{routing::post, Router};
use bluepay_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{rebilling_webhook_handler, BluePayState};

/// Creates a router containing all routes for the BluePay feature.
///
/// # Arguments
/// * `config` - Shared application configuration (`Arc<AppConfig>`).
///
/// # Returns
/// An Axum Router configured with BluePay routes and state.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let bluepay_state = Arc::new(BluePayState { config });

    Router::new()
        // Endpoint called by the BluePay SERVER for rebilling notifications
        .route("/bluepay/rebilling", post(rebilling_webhook_handler))
        .with_state(bluepay_state)
}
