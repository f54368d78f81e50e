use crate::domain::model::{AlertmanagerPayload, GoogleChatMessage};
use std::fmt::Write;

pub const FIRING_ICON: &str = "🚨";
pub const RESOLVED_ICON: &str = "✅";

pub fn status_icon(status: &str) -> &'static str {
    if status == "resolved" {
        RESOLVED_ICON
    } else {
        FIRING_ICON
    }
}

/// Render the chat text for a whole Alertmanager notification.
///
/// A status header line is followed by one block per alert showing its
/// `alertname`, `instance` and `severity` labels and `summary` annotation.
/// Absent labels render as empty strings.
pub fn render_text(payload: &AlertmanagerPayload) -> String {
    let mut text = format!(
        "{} **Alert Status:** {}\n",
        status_icon(&payload.status),
        payload.status
    );

    for alert in &payload.alerts {
        let alertname = alert.label("alertname");

        tracing::debug!(alertname, labels = ?alert.labels, "Alert labels received");

        let _ = write!(
            text,
            "\n**Alert: {}**\n  ->Instance: `{}`\n  ->Severity: {}\n  ->Summary: {}\n",
            alertname,
            alert.label("instance"),
            alert.label("severity"),
            alert.annotation("summary"),
        );
    }

    text
}

pub fn render_message(payload: &AlertmanagerPayload) -> GoogleChatMessage {
    GoogleChatMessage::text(render_text(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Alert;
    use std::collections::HashMap;

    fn alert(labels: &[(&str, &str)], summary: Option<&str>) -> Alert {
        let labels: HashMap<String, String> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut annotations = HashMap::new();
        if let Some(summary) = summary {
            annotations.insert("summary".to_string(), summary.to_string());
        }
        Alert {
            labels,
            annotations,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_firing_alert() {
        let payload = AlertmanagerPayload {
            status: "firing".to_string(),
            alerts: vec![alert(
                &[
                    ("alertname", "HighCPU"),
                    ("instance", "node-1:9100"),
                    ("severity", "critical"),
                ],
                Some("CPU above 90%"),
            )],
        };

        assert_eq!(
            render_text(&payload),
            "🚨 **Alert Status:** firing\n\
             \n**Alert: HighCPU**\n  ->Instance: `node-1:9100`\n  ->Severity: critical\n  ->Summary: CPU above 90%\n"
        );
    }

    #[test]
    fn test_render_resolved_uses_check_icon() {
        let payload = AlertmanagerPayload {
            status: "resolved".to_string(),
            alerts: vec![],
        };
        assert_eq!(render_text(&payload), "✅ **Alert Status:** resolved\n");
    }

    #[test]
    fn test_unknown_status_uses_firing_icon() {
        assert_eq!(status_icon("Resolved"), FIRING_ICON);
        assert_eq!(status_icon(""), FIRING_ICON);
    }

    #[test]
    fn test_missing_labels_render_empty() {
        let payload = AlertmanagerPayload {
            status: "firing".to_string(),
            alerts: vec![alert(&[("alertname", "Orphan")], None)],
        };

        let text = render_text(&payload);
        assert!(text.contains("**Alert: Orphan**\n"));
        assert!(text.contains("  ->Instance: ``\n"));
        assert!(text.contains("  ->Severity: \n"));
        assert!(text.ends_with("  ->Summary: \n"));
    }

    #[test]
    fn test_alerts_rendered_in_order() {
        let payload = AlertmanagerPayload {
            status: "firing".to_string(),
            alerts: vec![
                alert(&[("alertname", "First")], None),
                alert(&[("alertname", "Second")], None),
            ],
        };

        let text = render_text(&payload);
        let first = text.find("**Alert: First**").unwrap();
        let second = text.find("**Alert: Second**").unwrap();
        assert!(first < second);

        let message = render_message(&payload);
        assert_eq!(message.text, text);
        assert!(message.cards_v2.is_empty());
    }
}
