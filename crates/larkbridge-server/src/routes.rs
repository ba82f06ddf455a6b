//! Route configuration for the relay API.

use std::sync::Arc;

use axum::routing::{Router, get, post};
use larkbridge_alerts::WebhookTransport;
use tower_http::trace::TraceLayer;

use crate::handlers::{data_stream_alert, device_offline_alert, health_check, standard_alert};
use crate::state::RelayState;

/// Create the relay router.
pub fn create_router<T: WebhookTransport + 'static>(state: Arc<RelayState<T>>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check::<T>))
        // Standard Grafana alerts
        .route("/callback", post(standard_alert::<T>))
        // GPON OLT offline alerts
        .route("/olt_offline", post(device_offline_alert::<T>))
        // Celcom data streaming alerts
        .route("/celcom_alert", post(data_stream_alert::<T>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
