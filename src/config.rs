use crate::error::PluginError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default delivery timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

const DEFAULT_USERNAME: &str = "alerta";
const DEFAULT_ICON_EMOJI: &str = ":rocket:";

/// Plugin configuration, resolved once at startup and never mutated.
///
/// Resolution is environment-first with fallback to an optional YAML
/// config file; built-in defaults apply when neither source sets a
/// value. The webhook URL has no default and its absence is fatal.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub webhook_url: String,
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub dashboard_url: String,
    pub disabled_severities: Option<HashSet<String>>,
    pub timeout_secs: u64,
    /// The status-change hook filters on ack/assign but the actual
    /// send has historically been disabled. Off unless explicitly
    /// enabled.
    pub notify_on_status_change: bool,
}

/// On-disk shape of the optional YAML config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub webhook_url: Option<String>,
    pub channel: Option<String>,
    pub username: Option<String>,
    pub icon_emoji: Option<String>,
    pub dashboard_url: Option<String>,
    pub disabled_severities: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub notify_on_status_change: Option<bool>,
}

impl ConfigFile {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConfigFile = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl NotificationConfig {
    /// Resolve configuration from the process environment, falling
    /// back to `file` for anything the environment leaves unset.
    pub fn from_env(file: Option<ConfigFile>) -> Result<Self, PluginError> {
        Self::resolve(|name| std::env::var(name).ok(), file)
    }

    /// Resolution core, factored over an environment lookup so tests
    /// can inject a map instead of mutating the process env.
    pub fn resolve<F>(env: F, file: Option<ConfigFile>) -> Result<Self, PluginError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();

        let webhook_url = env("ROCKETCHAT_WEBHOOK_URL")
            .or(file.webhook_url)
            .ok_or(PluginError::MissingSetting("ROCKETCHAT_WEBHOOK_URL"))?;

        let disabled_severities = env("ROCKETCHAT_DISABLE_NOTIFICATION_SEVERITY")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .or(file.disabled_severities)
            .map(|v| v.into_iter().collect::<HashSet<_>>())
            .filter(|set| !set.is_empty());

        let timeout_secs = env("ROCKETCHAT_TIMEOUT")
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            webhook_url,
            channel: env("ROCKETCHAT_CHANNEL")
                .or(file.channel)
                .unwrap_or_default(),
            username: env("ALERTA_USERNAME")
                .or(file.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            icon_emoji: env("ICON_EMOJI")
                .or(file.icon_emoji)
                .unwrap_or_else(|| DEFAULT_ICON_EMOJI.to_string()),
            dashboard_url: env("DASHBOARD_URL")
                .or(file.dashboard_url)
                .unwrap_or_default(),
            disabled_severities,
            timeout_secs,
            notify_on_status_change: file.notify_on_status_change.unwrap_or(false),
        })
    }

    /// Whether notifications for this severity are suppressed.
    pub fn severity_disabled(&self, severity: &str) -> bool {
        self.disabled_severities
            .as_ref()
            .is_some_and(|set| set.contains(severity))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
