//! HTTP request handlers for the relay API.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use larkbridge_alerts::{NormalizedAlert, RawAlert, TemplateKind, WebhookTransport, card};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RelayError, RelayResult};
use crate::state::RelayState;

/// Inbound Grafana webhook body: a batch of alerts.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertWebhook {
    /// The alerts in this notification; only the first is relayed.
    pub alerts: Vec<RawAlert>,
}

/// Response body for a successfully relayed alert.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
}

/// Handle GET /health - health check endpoint.
pub async fn health_check<T: WebhookTransport>(
    State(state): State<Arc<RelayState<T>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Handle POST /callback - standard Grafana alerts.
pub async fn standard_alert<T: WebhookTransport>(
    State(state): State<Arc<RelayState<T>>>,
    payload: Result<Json<AlertWebhook>, JsonRejection>,
) -> RelayResult<Json<RelayResponse>> {
    relay_alert(
        &state,
        payload,
        TemplateKind::Standard,
        "Alert processed and sent to Lark",
    )
    .await
}

/// Handle POST `/olt_offline` - GPON OLT offline alerts.
pub async fn device_offline_alert<T: WebhookTransport>(
    State(state): State<Arc<RelayState<T>>>,
    payload: Result<Json<AlertWebhook>, JsonRejection>,
) -> RelayResult<Json<RelayResponse>> {
    relay_alert(
        &state,
        payload,
        TemplateKind::DeviceOffline,
        "OLT offline alert processed and sent to Lark",
    )
    .await
}

/// Handle POST `/celcom_alert` - Celcom data streaming alerts.
pub async fn data_stream_alert<T: WebhookTransport>(
    State(state): State<Arc<RelayState<T>>>,
    payload: Result<Json<AlertWebhook>, JsonRejection>,
) -> RelayResult<Json<RelayResponse>> {
    relay_alert(
        &state,
        payload,
        TemplateKind::DataStreamGap,
        "Celcom alert processed and sent to Lark",
    )
    .await
}

/// Shared relay path: validate the batch, normalize the first alert,
/// render its card, and dispatch it.
async fn relay_alert<T: WebhookTransport>(
    state: &RelayState<T>,
    payload: Result<Json<AlertWebhook>, JsonRejection>,
    kind: TemplateKind,
    success_message: &str,
) -> RelayResult<Json<RelayResponse>> {
    let Json(webhook) =
        payload.map_err(|rejection| RelayError::InvalidRequest(rejection.body_text()))?;

    // Grafana batches alerts; only the first is relayed.
    let raw = webhook.alerts.first().ok_or(RelayError::EmptyAlerts)?;
    debug!(
        template = %kind,
        alerts = webhook.alerts.len(),
        "incoming alert batch"
    );

    let alert = NormalizedAlert::from_raw(raw, kind)?;
    let message = card::render(&alert)?;

    if state.dispatcher().dispatch(&message).await? {
        info!(template = %kind, status = %alert.status, "alert relayed to Lark");
        Ok(Json(RelayResponse {
            message: success_message.to_string(),
        }))
    } else {
        Err(RelayError::DispatchFailed)
    }
}
