//! Core types for the alert relay pipeline.
//!
//! This module provides the fundamental types used throughout the crate:
//! - [`RawAlert`]: A Grafana alert exactly as it arrives on the wire
//! - [`AlertStatus`]: Firing/resolved classification of an alert
//! - [`TemplateKind`]: Which card template renders an alert
//! - [`NormalizedAlert`]: The flat record the card templates consume

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AlertError, Result};

/// A single alert as Grafana posts it: a status string, nested
/// labels/annotations maps, and optional start/end timestamps.
///
/// Every field is optional on the wire; defaults are substituted during
/// normalization. The one structural requirement is the `labels` object,
/// whose absence fails normalization with [`AlertError::MissingLabels`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAlert {
    /// Alert status string; compared case-insensitively against "firing".
    #[serde(default)]
    pub status: Option<String>,
    /// Label set attached by the alert rule.
    #[serde(default)]
    pub labels: Option<HashMap<String, String>>,
    /// Free-form annotations; the issue description lives here.
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    /// When the alert started firing, as `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(rename = "startsAt", default)]
    pub starts_at: Option<String>,
    /// When the alert resolved, as `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(rename = "endsAt", default)]
    pub ends_at: Option<String>,
}

/// The firing/resolved classification of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// The alert condition is currently active.
    Firing,
    /// The alert condition has ended.
    Resolved,
}

impl AlertStatus {
    /// Classifies a raw status string.
    ///
    /// A value that case-insensitively equals "firing" classifies as
    /// [`AlertStatus::Firing`]; anything else, including an absent status,
    /// classifies as [`AlertStatus::Resolved`].
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("firing") => Self::Firing,
            _ => Self::Resolved,
        }
    }

    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firing => "firing",
            Self::Resolved => "resolved",
        }
    }

    /// Returns true if the alert is currently firing.
    #[must_use]
    pub const fn is_firing(&self) -> bool {
        matches!(self, Self::Firing)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which card template renders an alert; selected by the inbound route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// General-purpose alert card.
    Standard,
    /// GPON OLT device offline card.
    DeviceOffline,
    /// Celcom data streaming gap card.
    DataStreamGap,
}

impl TemplateKind {
    /// Returns the template kind as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::DeviceOffline => "device_offline",
            Self::DataStreamGap => "data_stream_gap",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Template-specific fields extracted from the alert labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateFields {
    /// Fields consumed by the standard alert card.
    Standard {
        /// Name of the alert rule.
        alertname: String,
        /// Location the alert fired at.
        name: String,
        /// Host the alert fired on.
        host: String,
        /// Human-readable issue description.
        description: String,
    },
    /// Fields consumed by the OLT device-offline card.
    DeviceOffline {
        /// Region the device sits in, taken from the host label.
        region: String,
        /// OLT device name, taken from the name label.
        olt_name: String,
    },
    /// Fields consumed by the data-streaming-gap card.
    DataStreamGap {
        /// Interface the stream arrives on.
        interface: String,
    },
}

impl TemplateFields {
    /// The template kind these fields belong to.
    #[must_use]
    pub const fn kind(&self) -> TemplateKind {
        match self {
            Self::Standard { .. } => TemplateKind::Standard,
            Self::DeviceOffline { .. } => TemplateKind::DeviceOffline,
            Self::DataStreamGap { .. } => TemplateKind::DataStreamGap,
        }
    }
}

/// The flat, request-scoped record a card template consumes.
///
/// Derived once per request from a [`RawAlert`] and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAlert {
    /// Firing or resolved.
    pub status: AlertStatus,
    /// Optional link attached to the alert via the url label.
    pub url: Option<String>,
    /// Raw start timestamp, copied verbatim.
    pub starts_at: Option<String>,
    /// Raw end timestamp, copied verbatim.
    pub ends_at: Option<String>,
    /// Template-specific fields.
    pub fields: TemplateFields,
}

impl NormalizedAlert {
    /// Flattens a raw alert into the record a template consumes.
    ///
    /// Absent labels get named defaults ("Unknown Alert", "Unknown Host",
    /// and so on). Timestamps are copied verbatim and validated later by
    /// the time helpers.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::MissingLabels`] when the payload has no
    /// `labels` object at all.
    pub fn from_raw(raw: &RawAlert, kind: TemplateKind) -> Result<Self> {
        let labels = raw.labels.as_ref().ok_or(AlertError::MissingLabels)?;
        let label = |key: &str, default: &str| {
            labels
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let fields = match kind {
            TemplateKind::Standard => TemplateFields::Standard {
                alertname: label("alertname", "Unknown Alert"),
                name: label("name", "Unknown Location"),
                host: label("host", "Unknown Host"),
                description: raw
                    .annotations
                    .get("description")
                    .cloned()
                    .unwrap_or_else(|| "No description provided".to_string()),
            },
            TemplateKind::DeviceOffline => TemplateFields::DeviceOffline {
                region: label("host", "Unknown Region"),
                olt_name: label("name", "Unknown OLT"),
            },
            TemplateKind::DataStreamGap => TemplateFields::DataStreamGap {
                interface: label("interface", "Unknown Interface"),
            },
        };

        Ok(Self {
            status: AlertStatus::from_raw(raw.status.as_deref()),
            url: labels.get("url").cloned(),
            starts_at: raw.starts_at.clone(),
            ends_at: raw.ends_at.clone(),
            fields,
        })
    }

    /// The URL shown in card titles, with the placeholder used when the
    /// alert carries none.
    #[must_use]
    pub fn url_or_placeholder(&self) -> &str {
        self.url.as_deref().unwrap_or("No URL Provided")
    }
}
