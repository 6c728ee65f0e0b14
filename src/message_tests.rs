#[cfg(test)]
mod tests {
    use crate::alert::Alert;
    use crate::config::NotificationConfig;
    use crate::error::PluginError;
    use crate::message::build_payload;

    fn test_config() -> NotificationConfig {
        NotificationConfig {
            webhook_url: "https://chat.example.com/hooks/x".to_string(),
            channel: "#alerts".to_string(),
            username: "alerta".to_string(),
            icon_emoji: ":rocket:".to_string(),
            dashboard_url: "https://alerta.example.com".to_string(),
            disabled_severities: None,
            timeout_secs: 2,
            notify_on_status_change: false,
        }
    }

    fn test_alert() -> Alert {
        Alert {
            id: "abc123".to_string(),
            status: "open".to_string(),
            severity: "critical".to_string(),
            previous_severity: "unknown".to_string(),
            environment: "prod".to_string(),
            event: "DiskFull".to_string(),
            resource: "host1".to_string(),
            service: vec!["storage".to_string(), "backups".to_string()],
            text: "disk usage above 95%".to_string(),
            raw_data: r#"{"labels": {"alertname": "DiskFull", "instance": "host1"},"#.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_and_link() {
        let payload = build_payload(&test_config(), &test_alert(), None, None).unwrap();
        let attachment = &payload.attachments[0];

        assert_eq!(attachment.title, "[Open] prod: DiskFull on host1");
        assert_eq!(
            attachment.title_link,
            "https://alerta.example.com/#/alert/abc123"
        );
    }

    #[test]
    fn test_top_level_fields() {
        let payload = build_payload(&test_config(), &test_alert(), None, None).unwrap();

        assert_eq!(payload.channel, "#alerts");
        assert_eq!(payload.alias, "alerta");
        assert_eq!(payload.emoji, ":rocket:");
        assert!(payload.text.is_none());
    }

    #[test]
    fn test_payload_text_serializes_as_null() {
        let payload = build_payload(&test_config(), &test_alert(), None, None).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json["text"].is_null());
        assert_eq!(json["attachments"][0]["fields"][0]["short"], true);
    }

    #[test]
    fn test_field_order_and_values() {
        let payload = build_payload(&test_config(), &test_alert(), None, None).unwrap();
        let fields = &payload.attachments[0].fields;

        let titles: Vec<&str> = fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Status", "Environment", "Resource", "Services", "Silence"]
        );
        assert_eq!(fields[0].value, "Open");
        assert_eq!(fields[1].value, "prod");
        assert_eq!(fields[2].value, "host1");
        assert_eq!(fields[3].value, "storage, backups");
    }

    #[test]
    fn test_color_from_severity() {
        let payload = build_payload(&test_config(), &test_alert(), None, None).unwrap();
        assert_eq!(payload.attachments[0].color, "#FF0000");

        let mut alert = test_alert();
        alert.severity = "somethingelse".to_string();
        let payload = build_payload(&test_config(), &alert, None, None).unwrap();
        assert_eq!(payload.attachments[0].color, "#00CC00");
    }

    #[test]
    fn test_status_override_is_capitalized() {
        let payload =
            build_payload(&test_config(), &test_alert(), Some("ack"), Some("on it")).unwrap();

        assert_eq!(
            payload.attachments[0].title,
            "[Ack] prod: DiskFull on host1"
        );
        assert_eq!(payload.attachments[0].fields[0].value, "Ack");
        assert_eq!(payload.text.as_deref(), Some("on it"));
        // Color keys off the alert's severity, never the override.
        assert_eq!(payload.attachments[0].color, "#FF0000");
    }

    #[test]
    fn test_silence_link_encodes_labels() {
        let mut alert = test_alert();
        alert.raw_data = r#"{"labels": {"alertname": "X", "job": "Y"},"#.to_string();

        let payload = build_payload(&test_config(), &alert, None, None).unwrap();
        let silence = &payload.attachments[0].fields[4].value;

        assert!(silence.starts_with("[Silence this alert :no_bell:]("));
        assert!(silence.contains("/#/silences/new?filter=%7B"));
        assert!(silence.contains("alertname%3DX%2Cjob%3DY"));
        assert!(silence.ends_with("%7D)"));
    }

    #[test]
    fn test_silence_link_preserves_label_order() {
        let mut alert = test_alert();
        alert.raw_data =
            r#"{"labels": {"zone": "eu", "alertname": "X", "instance": "host1"},"#.to_string();

        let payload = build_payload(&test_config(), &alert, None, None).unwrap();
        let silence = &payload.attachments[0].fields[4].value;

        assert!(silence.contains("zone%3Deu%2Calertname%3DX%2Cinstance%3Dhost1"));
    }

    #[test]
    fn test_heartbeat_events_get_fixed_text() {
        for event in ["HeartbeatFail", "HeartbeatOK"] {
            let mut alert = test_alert();
            alert.event = event.to_string();
            alert.raw_data = String::new(); // must not matter

            let payload = build_payload(&test_config(), &alert, None, None).unwrap();
            assert_eq!(
                payload.attachments[0].fields[4].value,
                "Check stale alerts https://alerta.infra.skillbox.pro/heartbeats"
            );
        }
    }

    #[test]
    fn test_missing_labels_block_fails() {
        let mut alert = test_alert();
        alert.raw_data = r#"{"annotations": {"summary": "disk"}}"#.to_string();

        let result = build_payload(&test_config(), &alert, None, None);
        assert!(matches!(result, Err(PluginError::MalformedRawData)));
    }

    #[test]
    fn test_labels_block_without_pairs_fails() {
        let mut alert = test_alert();
        alert.raw_data = r#"{"labels": {  },"#.to_string();

        let result = build_payload(&test_config(), &alert, None, None);
        assert!(matches!(result, Err(PluginError::MalformedRawData)));
    }
}
