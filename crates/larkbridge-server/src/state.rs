//! Shared state for the relay server.

use std::time::Instant;

use larkbridge_alerts::{Dispatcher, WebhookTransport};

use crate::config::RelayConfig;

/// Shared, read-only state behind every request handler.
///
/// Holds the configuration loaded at startup and the outbound dispatcher.
/// Nothing here mutates after construction, so handlers share it through a
/// plain `Arc` without locking.
#[derive(Debug)]
pub struct RelayState<T> {
    config: RelayConfig,
    dispatcher: Dispatcher<T>,
    started_at: Instant,
}

impl<T: WebhookTransport> RelayState<T> {
    /// Creates relay state from configuration and a webhook transport.
    pub fn new(config: RelayConfig, transport: T) -> Self {
        let dispatcher = Dispatcher::new(transport, config.webhook_urls.clone());
        Self {
            config,
            dispatcher,
            started_at: Instant::now(),
        }
    }

    /// The relay configuration.
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// The outbound dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Seconds since the server started.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
