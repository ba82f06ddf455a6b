//! # larkbridge-server
//!
//! HTTP relay receiving Grafana alert webhooks and forwarding Lark
//! interactive cards to a configured list of webhook destinations.
//!
//! Built on the axum HTTP framework on top of the `larkbridge-alerts`
//! transformation pipeline.
//!
//! ## Example
//!
//! ```rust,no_run
//! use larkbridge_server::{RelayConfig, RelayServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RelayConfig::from_env();
//!     let server = RelayServer::from_config(config).unwrap();
//!     server.serve().await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/callback` | POST | Standard Grafana alerts |
//! | `/olt_offline` | POST | GPON OLT device offline alerts |
//! | `/celcom_alert` | POST | Celcom data streaming alerts |
//! | `/health` | GET | Health check with uptime |
//!
//! Each alert route expects a JSON body with an `alerts` array; only the
//! first element is relayed. A missing or malformed body answers 400, and
//! 500 is returned when every destination rejects the card.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use server::RelayServer;
pub use state::RelayState;
