use crate::utils::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Alertmanager webhook body. Only the fields the chat message needs are kept.
///
/// Decoding is lenient in the same ways Alertmanager-compatible senders rely
/// on: keys match case-insensitively (an exact match wins), `null` anywhere
/// means "empty", and a repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertmanagerPayload {
    pub alerts: Vec<Alert>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    pub starts_at: String,
    pub ends_at: String,
}

impl AlertmanagerPayload {
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(object) = as_object("payload", value)? else {
            return Ok(Self::default());
        };

        let alerts = match field(object, "alerts") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Alert::from_json)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => return Err(type_error("alerts", "array", other)),
        };

        Ok(Self {
            alerts,
            status: string_field(object, "status")?,
        })
    }
}

impl Alert {
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(object) = as_object("alert", value)? else {
            return Ok(Self::default());
        };

        Ok(Self {
            labels: string_map(object, "labels")?,
            annotations: string_map(object, "annotations")?,
            starts_at: string_field(object, "startsAt")?,
            ends_at: string_field(object, "endsAt")?,
        })
    }

    /// Label value, or an empty string when the label is absent.
    pub fn label(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn annotation(&self, key: &str) -> &str {
        self.annotations
            .get(key)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Google Chat incoming-webhook message (text + optional cards).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleChatMessage {
    pub text: String,
    #[serde(rename = "cardsV2", default, skip_serializing_if = "Vec::is_empty")]
    pub cards_v2: Vec<Value>,
}

impl GoogleChatMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cards_v2: Vec::new(),
        }
    }
}

fn as_object<'a>(name: &str, value: &'a Value) -> Result<Option<&'a Map<String, Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(object) => Ok(Some(object)),
        other => Err(type_error(name, "object", other)),
    }
}

/// Exact key first, then the first key equal under case folding.
fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        let folded = name.to_lowercase();
        object
            .iter()
            .find(|(key, _)| key.to_lowercase() == folded)
            .map(|(_, value)| value)
    })
}

fn string_field(object: &Map<String, Value>, name: &str) -> Result<String> {
    match field(object, name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(type_error(name, "string", other)),
    }
}

// Map keys are data, so they are matched exactly.
fn string_map(object: &Map<String, Value>, name: &str) -> Result<HashMap<String, String>> {
    match field(object, name) {
        None | Some(Value::Null) => Ok(HashMap::new()),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(key, value)| match value {
                Value::Null => Ok((key.clone(), String::new())),
                Value::String(s) => Ok((key.clone(), s.clone())),
                other => Err(type_error(&format!("{}.{}", name, key), "string", other)),
            })
            .collect(),
        Some(other) => Err(type_error(name, "object", other)),
    }
}

fn type_error(name: &str, expected: &str, found: &Value) -> AdapterError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    AdapterError::InvalidPayload {
        message: format!("{}: expected {}, found {}", name, expected, found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_alertmanager_payload() {
        let body = json!({
            "version": "4",
            "groupKey": "{}:{alertname=\"HighCPU\"}",
            "status": "firing",
            "receiver": "gchat",
            "alerts": [{
                "status": "firing",
                "labels": {"alertname": "HighCPU", "instance": "node-1:9100", "severity": "critical"},
                "annotations": {"summary": "CPU above 90%"},
                "startsAt": "2024-05-01T10:00:00Z",
                "endsAt": "0001-01-01T00:00:00Z",
                "fingerprint": "abc123"
            }]
        });

        let payload = AlertmanagerPayload::from_json(&body).unwrap();
        assert_eq!(payload.status, "firing");
        assert_eq!(payload.alerts.len(), 1);

        let alert = &payload.alerts[0];
        assert_eq!(alert.label("alertname"), "HighCPU");
        assert_eq!(alert.annotation("summary"), "CPU above 90%");
        assert_eq!(alert.starts_at, "2024-05-01T10:00:00Z");
        assert_eq!(alert.label("missing"), "");
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let payload = AlertmanagerPayload::from_json(&json!({
            "STATUS": "resolved",
            "Alerts": [{
                "Labels": {"alertname": "X"},
                "ANNOTATIONS": {"summary": "s"},
                "startsat": "2024-05-01T10:00:00Z"
            }]
        }))
        .unwrap();

        assert_eq!(payload.status, "resolved");
        assert_eq!(payload.alerts[0].label("alertname"), "X");
        assert_eq!(payload.alerts[0].annotation("summary"), "s");
        assert_eq!(payload.alerts[0].starts_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_exact_key_wins_over_folded_key() {
        let payload = AlertmanagerPayload::from_json(&json!({
            "Status": "firing",
            "status": "resolved"
        }))
        .unwrap();
        assert_eq!(payload.status, "resolved");
    }

    #[test]
    fn test_label_keys_are_not_folded() {
        let payload = AlertmanagerPayload::from_json(&json!({
            "alerts": [{"labels": {"AlertName": "X"}}]
        }))
        .unwrap();
        assert_eq!(payload.alerts[0].label("alertname"), "");
        assert_eq!(payload.alerts[0].label("AlertName"), "X");
    }

    #[test]
    fn test_null_and_missing_fields() {
        assert_eq!(
            AlertmanagerPayload::from_json(&Value::Null).unwrap(),
            AlertmanagerPayload::default()
        );
        assert_eq!(
            AlertmanagerPayload::from_json(&json!({"alerts": null})).unwrap(),
            AlertmanagerPayload::default()
        );

        let payload = AlertmanagerPayload::from_json(&json!({
            "status": null,
            "alerts": [null, {"labels": null, "annotations": {}}]
        }))
        .unwrap();
        assert_eq!(payload.status, "");
        assert_eq!(payload.alerts, vec![Alert::default(), Alert::default()]);
    }

    #[test]
    fn test_null_map_values_become_empty() {
        let payload = AlertmanagerPayload::from_json(&json!({
            "alerts": [{
                "labels": {"alertname": "X", "instance": null},
                "annotations": {"summary": null}
            }]
        }))
        .unwrap();

        let alert = &payload.alerts[0];
        assert_eq!(alert.labels.get("instance").map(String::as_str), Some(""));
        assert_eq!(alert.annotations.get("summary").map(String::as_str), Some(""));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let cases = [
            json!({"alerts": [{"labels": {"port": 9100}}]}),
            json!({"status": 1}),
            json!({"alerts": {}}),
            json!({"alerts": [42]}),
            json!({"alerts": [{"annotations": []}]}),
            json!([1, 2]),
            json!("firing"),
        ];

        for case in cases {
            assert!(
                matches!(
                    AlertmanagerPayload::from_json(&case),
                    Err(AdapterError::InvalidPayload { .. })
                ),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_chat_message_omits_empty_cards() {
        let encoded = serde_json::to_value(GoogleChatMessage::text("hello")).unwrap();
        assert_eq!(encoded, json!({"text": "hello"}));

        let with_card = GoogleChatMessage {
            text: "hello".to_string(),
            cards_v2: vec![json!({"cardId": "c1"})],
        };
        let encoded = serde_json::to_value(with_card).unwrap();
        assert_eq!(encoded["cardsV2"][0]["cardId"], "c1");
    }
}
