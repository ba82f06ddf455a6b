//! Relay server implementation.

use std::sync::Arc;

use larkbridge_alerts::{HttpTransport, WebhookTransport};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::routes::create_router;
use crate::state::RelayState;

/// HTTP relay server.
///
/// Listens for Grafana alert webhooks and forwards rendered Lark cards to
/// the configured destinations.
#[derive(Debug, Clone)]
pub struct RelayServer<T> {
    state: Arc<RelayState<T>>,
}

impl RelayServer<HttpTransport> {
    /// Creates a server with the production reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound HTTP client cannot be constructed.
    pub fn from_config(config: RelayConfig) -> RelayResult<Self> {
        let transport = HttpTransport::new(config.request_timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: WebhookTransport + 'static> RelayServer<T> {
    /// Creates a server over a custom webhook transport.
    #[must_use]
    pub fn with_transport(config: RelayConfig, transport: T) -> Self {
        Self {
            state: Arc::new(RelayState::new(config, transport)),
        }
    }

    /// Get the relay state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<RelayState<T>> {
        self.state.clone()
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }

    /// Start the relay server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the configured address fails.
    pub async fn serve(&self) -> RelayResult<()> {
        let addr = self.state.config().bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::BindFailed(addr, e))?;

        info!(
            addr = %addr,
            destinations = self.state.dispatcher().destination_count(),
            "relay server listening"
        );

        axum::serve(listener, self.router())
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the relay server with graceful shutdown support.
    ///
    /// The server shuts down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the configured address fails.
    pub async fn serve_with_shutdown<F>(&self, shutdown: F) -> RelayResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.state.config().bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::BindFailed(addr, e))?;

        info!(
            addr = %addr,
            destinations = self.state.dispatcher().destination_count(),
            "relay server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        info!("relay server shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larkbridge_alerts::TransportError;
    use std::future::Future;
    use std::net::SocketAddr;

    #[derive(Debug, Clone, Default)]
    struct NullTransport;

    impl WebhookTransport for NullTransport {
        fn post(
            &self,
            _url: &str,
            _body: &str,
        ) -> impl Future<Output = Result<u16, TransportError>> + Send {
            async move { Ok(200) }
        }
    }

    fn make_test_server() -> RelayServer<NullTransport> {
        let config = RelayConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
            .with_webhook_url("http://lark.test/hook");
        RelayServer::with_transport(config, NullTransport)
    }

    #[test]
    fn test_server_creation() {
        let server = make_test_server();

        assert_eq!(server.state().dispatcher().destination_count(), 1);
    }

    #[test]
    fn test_server_clone_shares_state() {
        let server = make_test_server();
        let cloned = server.clone();

        assert!(Arc::ptr_eq(&server.state(), &cloned.state()));
    }

    #[test]
    fn test_from_config_builds_http_transport() {
        let config = RelayConfig::default();
        let server = RelayServer::from_config(config);

        assert!(server.is_ok());
    }

    #[tokio::test]
    async fn test_router_creation() {
        let server = make_test_server();
        let _router = server.router();

        // Router should be created without error
    }

    #[tokio::test]
    async fn test_serve_with_shutdown() {
        let server = make_test_server();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        // Give server a moment to start
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let _ = shutdown_tx.send(());

        let result =
            tokio::time::timeout(std::time::Duration::from_secs(1), server_handle).await;

        // Should complete without timeout
        assert!(result.is_ok());
    }
}
