//! Grafana alert to Lark card transformation and delivery.
//!
//! `larkbridge-alerts` turns Grafana webhook alerts into Lark interactive
//! message cards and forwards them to a list of webhook destinations.
//!
//! The pipeline has four stages:
//!
//! 1. **Normalization** ([`NormalizedAlert::from_raw`]): flattens the nested
//!    labels/annotations payload into the flat record a template consumes,
//!    substituting named defaults for absent labels.
//! 2. **Time formatting** ([`time::localize`], [`time::downtime`]): renders
//!    display times (UTC+3, 12-hour clock) and elapsed downtime.
//! 3. **Card rendering** ([`card::render`]): builds the interactive card
//!    for the alert's template, selected by the inbound route.
//! 4. **Dispatch** ([`Dispatcher::dispatch`]): POSTs the card to each
//!    destination in order; the first 200 response wins.
//!
//! # Example
//!
//! ```rust
//! use larkbridge_alerts::{card, NormalizedAlert, RawAlert, TemplateKind};
//! use std::collections::HashMap;
//!
//! let mut labels = HashMap::new();
//! labels.insert("alertname".to_string(), "HighCPU".to_string());
//!
//! let raw = RawAlert {
//!     status: Some("firing".to_string()),
//!     labels: Some(labels),
//!     starts_at: Some("2024-01-01T10:00:00Z".to_string()),
//!     ..RawAlert::default()
//! };
//!
//! let alert = NormalizedAlert::from_raw(&raw, TemplateKind::Standard).unwrap();
//! let message = card::render(&alert).unwrap();
//!
//! assert_eq!(message.card.header.title.content, "[FIRING] HighCPU");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod card;
pub mod dispatch;
pub mod error;
pub mod time;
pub mod types;

// Re-export main types at crate root
pub use card::{Card, CardColor, CardElement, LarkMessage};
pub use dispatch::{Dispatcher, HttpTransport, TransportError, WebhookTransport};
pub use error::{AlertError, Result};
pub use types::{AlertStatus, NormalizedAlert, RawAlert, TemplateFields, TemplateKind};
