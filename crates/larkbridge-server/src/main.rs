//! Larkbridge relay binary.
//!
//! Receives Grafana alert webhooks and forwards rendered Lark cards to the
//! webhook URLs named by `LARK_WEBHOOK_URLS`.

use larkbridge_server::{RelayConfig, RelayServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env();
    info!(
        addr = %config.bind_addr,
        destinations = config.webhook_urls.len(),
        "starting larkbridge relay"
    );

    let server = match RelayServer::from_config(config) {
        Ok(server) => server,
        Err(e) => {
            error!("failed to initialize relay: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.serve().await {
        error!("relay server error: {e}");
        std::process::exit(1);
    }
}
