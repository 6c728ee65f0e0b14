use crate::alert::Alert;
use crate::config::NotificationConfig;
use crate::error::{PluginError, Result};
use crate::severity;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Silence-creation page on the Alertmanager UI. The label filter is
/// appended percent-encoded between the literal `{` / `}` markers.
const SILENCE_URL: &str = "https://alertmanager.infra.skillbox.pro/#/silences/new?filter=";

/// Shown instead of a silence link for heartbeat events, which have no
/// labels to silence on.
const HEARTBEAT_TEXT: &str = "Check stale alerts https://alerta.infra.skillbox.pro/heartbeats";

/// Outbound Rocket.Chat webhook payload. Field names follow the
/// webhook contract exactly; `text` stays in the body as `null` when
/// there is no status-change reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketChatMessage {
    pub channel: String,
    pub text: Option<String>,
    pub alias: String,
    pub emoji: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub title_link: String,
    pub text: String,
    pub color: String,
    pub fields: Vec<AttachmentField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Build the webhook payload for an alert.
///
/// `status` and `text` override the alert's own status and message
/// body on manual status transitions; both are `None` on the normal
/// post-receive path. Pure except for the raw-data extraction, which
/// fails when the alert carries no labels block.
pub fn build_payload(
    config: &NotificationConfig,
    alert: &Alert,
    status: Option<&str>,
    text: Option<&str>,
) -> Result<RocketChatMessage> {
    let shown_status = capitalize(status.unwrap_or(&alert.status));
    let title = format!(
        "[{}] {}: {} on {}",
        shown_status, alert.environment, alert.event, alert.resource
    );

    let fields = vec![
        AttachmentField {
            title: "Status".to_string(),
            value: shown_status,
            short: true,
        },
        AttachmentField {
            title: "Environment".to_string(),
            value: alert.environment.clone(),
            short: true,
        },
        AttachmentField {
            title: "Resource".to_string(),
            value: alert.resource.clone(),
            short: true,
        },
        AttachmentField {
            title: "Services".to_string(),
            value: alert.service.join(", "),
            short: true,
        },
        AttachmentField {
            title: "Silence".to_string(),
            value: silence_field(alert)?,
            short: false,
        },
    ];

    Ok(RocketChatMessage {
        channel: config.channel.clone(),
        text: text.map(str::to_string),
        alias: config.username.clone(),
        emoji: config.icon_emoji.clone(),
        attachments: vec![Attachment {
            title,
            title_link: format!("{}/#/alert/{}", config.dashboard_url, alert.id),
            text: alert.text.clone(),
            color: severity::color_for(&alert.severity).to_string(),
            fields,
        }],
    })
}

/// Value of the Silence field: a fixed pointer at the heartbeats page
/// for heartbeat events, otherwise a markdown deep link that opens the
/// Alertmanager silence form pre-filtered to this alert's labels.
fn silence_field(alert: &Alert) -> Result<String> {
    if alert.event == "HeartbeatFail" || alert.event == "HeartbeatOK" {
        return Ok(HEARTBEAT_TEXT.to_string());
    }

    let filter = label_filter(&alert.raw_data)?;
    Ok(format!(
        "[Silence this alert :no_bell:]({}%7B{}%7D)",
        SILENCE_URL,
        urlencoding::encode(&filter)
    ))
}

/// Extract the `"labels": {...}` block from the alert's raw data and
/// rewrite it as `key=value` pairs joined with commas, ready for
/// percent-encoding into the silence filter.
///
/// The raw data is semi-structured text, not a trusted document, so
/// the block is located by regex and only string-valued labels are
/// taken (label values are always strings on the Alertmanager side).
/// Pair order is preserved. Nested objects inside the block are not
/// supported, matching the silence UI's flat filter format.
fn label_filter(raw_data: &str) -> Result<String> {
    let block_re = Regex::new(r#""labels":\s*\{([^}]+)\}"#).expect("labels pattern compiles");
    let pair_re = Regex::new(r#""(\w+)":\s*"([^"]*)""#).expect("label pair pattern compiles");

    let block = block_re
        .captures(raw_data)
        .and_then(|c| c.get(1))
        .ok_or(PluginError::MalformedRawData)?;

    let pairs: Vec<String> = pair_re
        .captures_iter(block.as_str())
        .map(|c| format!("{}={}", &c[1], &c[2]))
        .collect();

    if pairs.is_empty() {
        return Err(PluginError::MalformedRawData);
    }

    Ok(pairs.join(","))
}

/// First character uppercased, the rest lowercased ("open" -> "Open",
/// "ACK" -> "Ack").
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
