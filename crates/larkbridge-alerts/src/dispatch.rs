//! Sequential webhook delivery.
//!
//! A rendered card is POSTed to each configured destination in order; the
//! first destination answering 200 wins and the rest are skipped. Failures
//! are logged and recovered locally, only the aggregate outcome surfaces.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::card::LarkMessage;
use crate::error::{AlertError, Result};

/// A failed HTTP exchange: connect error, timeout, or protocol failure.
#[derive(Debug, Clone, Error)]
#[error("webhook request failed: {0}")]
pub struct TransportError(pub String);

/// Transport used to POST a JSON payload to a webhook URL.
///
/// The production implementation is [`HttpTransport`]; tests substitute
/// recording transports to observe delivery order.
pub trait WebhookTransport: Send + Sync {
    /// POSTs `body` as JSON to `url` and returns the response status code.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was obtained at all.
    fn post(
        &self,
        url: &str,
        body: &str,
    ) -> impl Future<Output = std::result::Result<u16, TransportError>> + Send;
}

/// reqwest-backed webhook transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport applying `timeout` to each request.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::NotificationFailed`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AlertError::NotificationFailed {
                reason: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl WebhookTransport for HttpTransport {
    fn post(
        &self,
        url: &str,
        body: &str,
    ) -> impl Future<Output = std::result::Result<u16, TransportError>> + Send {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string());

        async move {
            let response = request
                .send()
                .await
                .map_err(|err| TransportError(err.to_string()))?;
            Ok(response.status().as_u16())
        }
    }
}

/// Delivers rendered cards to an ordered list of webhook destinations.
///
/// The destination list is loaded once at startup and never mutated; the
/// dispatcher itself is stateless across sends.
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
    destinations: Vec<String>,
}

impl<T: WebhookTransport> Dispatcher<T> {
    /// Creates a dispatcher over the given destinations.
    #[must_use]
    pub fn new(transport: T, destinations: Vec<String>) -> Self {
        Self {
            transport,
            destinations,
        }
    }

    /// Number of configured destinations.
    #[must_use]
    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    /// The configured destination URLs, in delivery order.
    #[must_use]
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Sends the message to each destination in order, stopping at the
    /// first 200 response.
    ///
    /// Returns `true` once a destination accepts the message and `false`
    /// when every destination rejected it or was unreachable. Individual
    /// failures are logged and the next destination is tried; there are no
    /// per-destination retries.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Serialization`] if the card cannot be encoded.
    pub async fn dispatch(&self, message: &LarkMessage) -> Result<bool> {
        let payload = serde_json::to_string(message)?;
        debug!(payload = %payload, "rendered card payload");

        for url in &self.destinations {
            match self.transport.post(url, &payload).await {
                Ok(200) => {
                    info!(url = %url, "message sent to Lark");
                    return Ok(true);
                }
                Ok(status) => {
                    error!(url = %url, status, "Lark webhook rejected message");
                }
                Err(err) => {
                    error!(url = %url, error = %err, "error sending message to Lark");
                }
            }
        }

        Ok(false)
    }
}
