//! Lark interactive-message card model and the alert card templates.
//!
//! A rendered card is the JSON document a Lark webhook accepts:
//! `{"msg_type": "interactive", "card": {...}}` with a colored header and
//! an ordered list of content blocks (lark_md divs and hr dividers).
//!
//! Rendering is a pure transformation of a [`NormalizedAlert`] apart from
//! one clock read when an ongoing downtime interval has no end timestamp.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time;
use crate::types::{AlertStatus, NormalizedAlert, TemplateFields};

/// Header color tag of a Lark card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    /// Active problem.
    Red,
    /// Resolved.
    Green,
    /// Degraded but not critical.
    Orange,
}

impl CardColor {
    /// Returns the color as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Orange => "orange",
        }
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Plain-text title inside a card header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTitle {
    /// Always "plain_text".
    pub tag: String,
    /// The rendered title.
    pub content: String,
}

/// Card header: title plus color template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardHeader {
    /// The card title.
    pub title: CardTitle,
    /// Header color.
    pub template: CardColor,
}

/// Card-level display flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Render wide on desktop clients.
    pub wide_screen_mode: bool,
}

/// Markdown text inside a div element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardText {
    /// Always "lark_md".
    pub tag: String,
    /// The markdown content.
    pub content: String,
}

impl CardText {
    fn lark_md(content: impl Into<String>) -> Self {
        Self {
            tag: "lark_md".to_string(),
            content: content.into(),
        }
    }
}

/// One content block of a card body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum CardElement {
    /// A markdown text block.
    Div {
        /// The block's text payload.
        text: CardText,
    },
    /// A horizontal divider.
    Hr,
}

/// The card body of an interactive message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Display configuration.
    pub config: CardConfig,
    /// Header with title and color.
    pub header: CardHeader,
    /// Ordered content blocks.
    pub elements: Vec<CardElement>,
}

/// A complete interactive message, ready to POST to a Lark webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LarkMessage {
    /// Always "interactive".
    pub msg_type: String,
    /// The card document.
    pub card: Card,
}

impl LarkMessage {
    /// Creates an empty interactive card with the given title and header color.
    #[must_use]
    pub fn interactive(title: impl Into<String>, color: CardColor) -> Self {
        Self {
            msg_type: "interactive".to_string(),
            card: Card {
                config: CardConfig {
                    wide_screen_mode: true,
                },
                header: CardHeader {
                    title: CardTitle {
                        tag: "plain_text".to_string(),
                        content: title.into(),
                    },
                    template: color,
                },
                elements: Vec::new(),
            },
        }
    }

    fn push_div(&mut self, content: impl Into<String>) {
        self.card.elements.push(CardElement::Div {
            text: CardText::lark_md(content),
        });
    }

    fn push_divider(&mut self) {
        self.card.elements.push(CardElement::Hr);
    }
}

/// Renders a normalized alert into the card for its template.
///
/// The displayed timestamp is the start time while firing and the end time
/// once resolved; the downtime interval stays open (closed by the current
/// time) while firing.
///
/// # Errors
///
/// Returns [`crate::AlertError::InvalidTimestamp`] when the alert carries a
/// timestamp that does not match the wire format.
pub fn render(alert: &NormalizedAlert) -> Result<LarkMessage> {
    let firing = alert.status.is_firing();
    let shown_at = if firing {
        alert.starts_at.as_deref()
    } else {
        alert.ends_at.as_deref()
    };
    let timestamp = time::localize(shown_at)?;
    let duration = time::downtime(
        alert.starts_at.as_deref(),
        if firing {
            None
        } else {
            alert.ends_at.as_deref()
        },
    )?;

    Ok(match &alert.fields {
        TemplateFields::Standard {
            alertname,
            name,
            host,
            description,
        } => render_standard(alert, alertname, name, host, description, &timestamp, &duration),
        TemplateFields::DeviceOffline { region, olt_name } => {
            render_device_offline(alert, region, olt_name, &timestamp, &duration)
        }
        TemplateFields::DataStreamGap { .. } => {
            render_data_stream_gap(alert.status, &timestamp, &duration)
        }
    })
}

fn render_standard(
    alert: &NormalizedAlert,
    alertname: &str,
    name: &str,
    host: &str,
    description: &str,
    timestamp: &str,
    duration: &str,
) -> LarkMessage {
    let firing = alert.status.is_firing();
    let status_text = if firing { "FIRING" } else { "RESOLVED" };
    let color = if firing { CardColor::Red } else { CardColor::Green };
    let when_label = if firing { "Started" } else { "Resolved At" };

    let mut issue = description.to_string();
    if let Some(url) = &alert.url {
        issue.push_str(&format!("\n\n🔗 **URL**: {url}"));
    }

    let mut message = LarkMessage::interactive(format!("[{status_text}] {alertname}"), color);
    message.push_div(format!(
        "**<font color='blue'>📍 Location</font>**: {name} (Host: {host})\n\n\
         **<font color='{color}'>⚠️ Issue</font>**: {issue}\n\n\
         **<font color='gray'>🕒 {when_label}</font>**: {timestamp}\n\n\
         **<font color='gray'>⏳ Duration</font>**: {duration}"
    ));
    message
}

fn render_device_offline(
    alert: &NormalizedAlert,
    region: &str,
    olt_name: &str,
    timestamp: &str,
    duration: &str,
) -> LarkMessage {
    let firing = alert.status.is_firing();
    let color = if firing {
        CardColor::Orange
    } else {
        CardColor::Green
    };
    let status_text = if firing {
        format!("{olt_name} IS OFFLINE, PLS CHECK")
    } else {
        format!("{olt_name} IS BACK ONLINE")
    };

    let mut message = LarkMessage::interactive(
        format!("GPON OLT Monitoring {}", alert.url_or_placeholder()),
        color,
    );
    message.push_div(format!(
        "**🌍 Region**: {region}\n\n\
         **⚠️ Status**: {status_text}\n\n\
         **🕒 Started**: {timestamp}\n\n\
         **⏳ Duration**: {duration}"
    ));
    message.push_divider();
    message
}

fn render_data_stream_gap(status: AlertStatus, timestamp: &str, duration: &str) -> LarkMessage {
    let firing = status.is_firing();
    let status_text = if firing {
        "NO DATA STREAMING"
    } else {
        "DATA STREAMING RESTORED"
    };
    let color = if firing { CardColor::Red } else { CardColor::Green };
    let when_label = if firing { "Started" } else { "Resolved At" };
    let action = if firing {
        "**🧭 Action Needed**: Check SMS flow or Celcom Pipeline status."
    } else {
        "**✅ No action required — issue resolved.**"
    };

    let mut message = LarkMessage::interactive("Celcom Data Streaming Alert", color);
    message.push_div(format!(
        "**🚨 Celcom Data Streaming Alert**\n\n\
         **⚠️ Status**: {status_text}\n\n\
         **📍 Endpoint**: Celcom SMS Ingestion Point\n\n\
         **🕒 {when_label}**: {timestamp}\n\n\
         **⏳ Duration**: {duration}\n\n\
         {action}"
    ));
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawAlert, TemplateKind};
    use std::collections::HashMap;

    fn alert(
        kind: TemplateKind,
        status: &str,
        labels: &[(&str, &str)],
        description: Option<&str>,
    ) -> NormalizedAlert {
        let mut raw = RawAlert {
            status: Some(status.to_string()),
            labels: Some(
                labels
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect::<HashMap<_, _>>(),
            ),
            starts_at: Some("2024-01-01T10:00:00Z".to_string()),
            ends_at: Some("2024-01-01T12:30:00Z".to_string()),
            ..RawAlert::default()
        };
        if let Some(description) = description {
            raw.annotations
                .insert("description".to_string(), description.to_string());
        }
        NormalizedAlert::from_raw(&raw, kind).unwrap()
    }

    fn body_text(message: &LarkMessage) -> String {
        message
            .card
            .elements
            .iter()
            .filter_map(|element| match element {
                CardElement::Div { text } => Some(text.content.clone()),
                CardElement::Hr => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    mod standard_tests {
        use super::*;

        #[test]
        fn firing_card_header() {
            let alert = alert(
                TemplateKind::Standard,
                "firing",
                &[("alertname", "HighCPU")],
                Some("CPU above 90%"),
            );

            let message = render(&alert).unwrap();

            assert_eq!(message.card.header.title.content, "[FIRING] HighCPU");
            assert_eq!(message.card.header.template, CardColor::Red);
        }

        #[test]
        fn resolved_card_header() {
            let alert = alert(
                TemplateKind::Standard,
                "resolved",
                &[("alertname", "HighCPU")],
                None,
            );

            let message = render(&alert).unwrap();

            assert_eq!(message.card.header.title.content, "[RESOLVED] HighCPU");
            assert_eq!(message.card.header.template, CardColor::Green);
            assert!(body_text(&message).contains("Resolved At"));
        }

        #[test]
        fn url_line_appended_when_present() {
            let alert = alert(
                TemplateKind::Standard,
                "firing",
                &[("url", "https://grafana.example.com/d/abc")],
                Some("CPU above 90%"),
            );

            let body = body_text(&render(&alert).unwrap());

            assert!(body.contains("🔗 **URL**: https://grafana.example.com/d/abc"));
        }

        #[test]
        fn url_line_omitted_when_absent() {
            let alert = alert(
                TemplateKind::Standard,
                "firing",
                &[],
                Some("CPU above 90%"),
            );

            let body = body_text(&render(&alert).unwrap());

            assert!(!body.contains("URL"));
        }

        #[test]
        fn firing_uses_start_time_and_open_interval() {
            let mut alert = alert(TemplateKind::Standard, "firing", &[], None);
            alert.starts_at = Some("2024-01-01T10:00:00Z".to_string());
            alert.ends_at = None;

            let body = body_text(&render(&alert).unwrap());

            // 10:00 UTC renders as 01:00 PM at the +3h display offset.
            assert!(body.contains("Started"));
            assert!(body.contains("01:00 PM"));
        }

        #[test]
        fn resolved_duration_spans_start_to_end() {
            let alert = alert(TemplateKind::Standard, "resolved", &[], None);

            let body = body_text(&render(&alert).unwrap());

            assert!(body.contains("2hrs 30mins"));
        }

        #[test]
        fn absent_timestamps_render_placeholders() {
            let mut alert = alert(TemplateKind::Standard, "firing", &[], None);
            alert.starts_at = None;
            alert.ends_at = None;

            let body = body_text(&render(&alert).unwrap());

            assert!(body.contains("N/A"));
        }

        #[test]
        fn malformed_timestamp_fails_rendering() {
            let mut alert = alert(TemplateKind::Standard, "firing", &[], None);
            alert.starts_at = Some("yesterday".to_string());

            assert!(render(&alert).is_err());
        }
    }

    mod device_offline_tests {
        use super::*;

        #[test]
        fn firing_card() {
            let alert = alert(
                TemplateKind::DeviceOffline,
                "firing",
                &[("host", "Western"), ("name", "OLT-07")],
                None,
            );

            let message = render(&alert).unwrap();

            assert_eq!(
                message.card.header.title.content,
                "GPON OLT Monitoring No URL Provided"
            );
            assert_eq!(message.card.header.template, CardColor::Orange);

            let body = body_text(&message);
            assert!(body.contains("**🌍 Region**: Western"));
            assert!(body.contains("OLT-07 IS OFFLINE, PLS CHECK"));
        }

        #[test]
        fn resolved_card() {
            let alert = alert(
                TemplateKind::DeviceOffline,
                "resolved",
                &[("name", "OLT-07")],
                None,
            );

            let message = render(&alert).unwrap();

            assert_eq!(message.card.header.template, CardColor::Green);
            assert!(body_text(&message).contains("OLT-07 IS BACK ONLINE"));
        }

        #[test]
        fn title_uses_url_label() {
            let alert = alert(
                TemplateKind::DeviceOffline,
                "firing",
                &[("url", "10.0.0.7")],
                None,
            );

            let message = render(&alert).unwrap();

            assert_eq!(
                message.card.header.title.content,
                "GPON OLT Monitoring 10.0.0.7"
            );
        }

        #[test]
        fn trailing_divider() {
            let alert = alert(TemplateKind::DeviceOffline, "firing", &[], None);

            let message = render(&alert).unwrap();

            assert!(matches!(
                message.card.elements.last(),
                Some(CardElement::Hr)
            ));
        }
    }

    mod data_stream_gap_tests {
        use super::*;

        #[test]
        fn firing_card() {
            let alert = alert(TemplateKind::DataStreamGap, "firing", &[], None);

            let message = render(&alert).unwrap();

            assert_eq!(
                message.card.header.title.content,
                "Celcom Data Streaming Alert"
            );
            assert_eq!(message.card.header.template, CardColor::Red);

            let body = body_text(&message);
            assert!(body.contains("NO DATA STREAMING"));
            assert!(body.contains("Celcom SMS Ingestion Point"));
            assert!(body.contains("**🧭 Action Needed**"));
        }

        #[test]
        fn resolved_card_has_no_action_line() {
            let alert = alert(TemplateKind::DataStreamGap, "resolved", &[], None);

            let message = render(&alert).unwrap();

            assert_eq!(message.card.header.template, CardColor::Green);

            let body = body_text(&message);
            assert!(body.contains("DATA STREAMING RESTORED"));
            assert!(!body.contains("Action Needed"));
            assert!(body.contains("No action required"));
        }
    }

    mod wire_format_tests {
        use super::*;

        #[test]
        fn message_serializes_to_lark_shape() {
            let alert = alert(
                TemplateKind::Standard,
                "firing",
                &[("alertname", "HighCPU")],
                None,
            );

            let message = render(&alert).unwrap();
            let json: serde_json::Value =
                serde_json::from_str(&serde_json::to_string(&message).unwrap()).unwrap();

            assert_eq!(json["msg_type"], "interactive");
            assert_eq!(json["card"]["config"]["wide_screen_mode"], true);
            assert_eq!(json["card"]["header"]["title"]["tag"], "plain_text");
            assert_eq!(json["card"]["header"]["template"], "red");
            assert_eq!(json["card"]["elements"][0]["tag"], "div");
            assert_eq!(json["card"]["elements"][0]["text"]["tag"], "lark_md");
        }

        #[test]
        fn divider_serializes_as_hr_tag() {
            let element = CardElement::Hr;
            let json = serde_json::to_value(&element).unwrap();

            assert_eq!(json, serde_json::json!({"tag": "hr"}));
        }

        #[test]
        fn color_serializes_lowercase() {
            assert_eq!(
                serde_json::to_value(CardColor::Orange).unwrap(),
                serde_json::json!("orange")
            );
            assert_eq!(CardColor::Red.to_string(), "red");
        }

        #[test]
        fn identical_input_renders_identical_card() {
            let alert = alert(TemplateKind::Standard, "resolved", &[], None);

            let first = serde_json::to_string(&render(&alert).unwrap()).unwrap();
            let second = serde_json::to_string(&render(&alert).unwrap()).unwrap();

            assert_eq!(first, second);
        }
    }
}
