use crate::alert::Alert;
use crate::config::NotificationConfig;
use crate::error::{PluginError, Result};
use crate::message::{self, RocketChatMessage};
use async_trait::async_trait;
use std::time::Duration;

/// Previous severities for which an "ok" transition is worth a
/// recovery notification.
const NOTIFIABLE_RECOVERIES: [&str; 3] = ["critical", "Disaster", "unknown"];

/// Statuses a manual status change must match before the hook even
/// considers sending.
const STATUS_CHANGE_FILTER: [&str; 2] = ["ack", "assign"];

/// Lifecycle hooks invoked by the host alerting engine, one call per
/// alert event. Invocations are sequential; hooks hold no mutable
/// state beyond the config resolved at startup.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Invoked before the engine processes the alert. May rewrite the
    /// alert; this plugin passes it through untouched.
    fn pre_receive(&self, alert: Alert) -> Alert;

    /// Invoked after the engine accepts an alert state change.
    async fn post_receive(&self, alert: &Alert) -> Result<()>;

    /// Invoked on a manual status transition with the target status
    /// and the operator's reason text.
    async fn status_change(&self, alert: &Alert, status: &str, text: &str) -> Result<()>;
}

/// Forwards alert notifications to a Rocket.Chat incoming webhook.
pub struct RocketChatPlugin {
    config: NotificationConfig,
    client: reqwest::Client,
}

impl RocketChatPlugin {
    pub fn new(config: &NotificationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config: config.clone(),
            client,
        }
    }

    /// POST the payload to the configured webhook. Transport failures
    /// are normalized into a single delivery error; the HTTP status of
    /// a completed exchange is logged but never inspected.
    async fn deliver(&self, payload: &RocketChatMessage) -> Result<()> {
        tracing::debug!("Rocket.Chat: sending to {}", self.config.webhook_url);

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| PluginError::Delivery(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Rocket.Chat: {} - {}", status, body);

        Ok(())
    }
}

#[async_trait]
impl Plugin for RocketChatPlugin {
    fn pre_receive(&self, alert: Alert) -> Alert {
        alert
    }

    async fn post_receive(&self, alert: &Alert) -> Result<()> {
        // Repeats were already notified once.
        if alert.repeat {
            tracing::debug!("Skipping repeat alert {}", alert.id);
            return Ok(());
        }

        // Suppressed severities still notify when backing off from
        // critical.
        if self.config.severity_disabled(&alert.severity) && alert.previous_severity != "critical" {
            tracing::debug!(
                "Notifications disabled for severity '{}', skipping alert {}",
                alert.severity,
                alert.id
            );
            return Ok(());
        }

        // A recovery only means something after an active incident or
        // an unknown state.
        if alert.severity == "ok"
            && !NOTIFIABLE_RECOVERIES.contains(&alert.previous_severity.as_str())
        {
            tracing::debug!(
                "Skipping ok alert {} (previous severity '{}')",
                alert.id,
                alert.previous_severity
            );
            return Ok(());
        }

        let payload = message::build_payload(&self.config, alert, None, None)?;
        self.deliver(&payload).await
    }

    async fn status_change(&self, alert: &Alert, status: &str, text: &str) -> Result<()> {
        if !STATUS_CHANGE_FILTER.contains(&status) {
            return Ok(());
        }

        // The send on this path ships disabled; only the filter above
        // is live unless the operator opts in.
        if !self.config.notify_on_status_change {
            tracing::debug!(
                "Status change '{}' on alert {} matched but notifications are disabled",
                status,
                alert.id
            );
            return Ok(());
        }

        let payload = message::build_payload(&self.config, alert, Some(status), Some(text))?;
        self.deliver(&payload).await
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
