use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A server-managed network alert (watch rule on an address or range).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkAlert {
    pub id: Option<String>,
    pub name: Option<String>,
    pub filters: AlertFilters,
    /// Trigger name to trigger-specific configuration.
    pub triggers: BTreeMap<String, serde_json::Value>,
    pub created: Option<String>,
}

impl NetworkAlert {
    pub fn trigger_names(&self) -> Vec<&str> {
        self.triggers.keys().map(String::as_str).collect()
    }
}

/// Notification channel attached to an alert, from the notifier endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertNotification {
    pub id: Option<String>,
    pub provider: Option<String>,
    pub description: Option<String>,
}

impl AlertNotification {
    /// The notifier endpoint answers either a bare list or an object with a
    /// `matches` list; anything else reads as no notifications.
    pub fn from_payload(payload: serde_json::Value) -> Vec<AlertNotification> {
        let entries = match payload {
            serde_json::Value::Array(entries) => entries,
            serde_json::Value::Object(mut map) => match map.remove("matches") {
                Some(serde_json::Value::Array(entries)) => entries,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertFilters {
    /// Watched networks. The API sends a single string for one-network
    /// alerts and a list otherwise.
    #[serde(deserialize_with = "one_or_many")]
    pub ip: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(ip) => vec![ip],
        OneOrMany::Many(ips) => ips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_single_ip_filter() {
        let alert: NetworkAlert = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "name": "Corporate Network",
            "filters": { "ip": "198.51.100.0/24" }
        }))
        .unwrap();
        assert_eq!(alert.filters.ip, vec!["198.51.100.0/24"]);
    }

    #[test]
    fn test_alert_list_ip_filter_and_triggers() {
        let alert: NetworkAlert = serde_json::from_value(serde_json::json!({
            "id": "a2",
            "name": "IoT Devices",
            "filters": { "ip": ["203.0.113.0/24", "192.0.2.0/24"] },
            "triggers": { "malware": {}, "iot": {} },
            "created": "2025-06-08T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(alert.filters.ip.len(), 2);
        assert_eq!(alert.trigger_names(), vec!["iot", "malware"]);
    }

    #[test]
    fn test_notifications_from_matches_object() {
        let payload = serde_json::json!({
            "matches": [
                { "id": "default", "provider": "email", "description": "Email ops" },
                { "id": "n2", "provider": "slack" }
            ],
            "total": 2
        });
        let notifications = AlertNotification::from_payload(payload);
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].provider.as_deref(), Some("email"));
    }

    #[test]
    fn test_notifications_from_bare_list_and_junk() {
        let from_list = AlertNotification::from_payload(serde_json::json!([
            { "id": "default", "provider": "email" }
        ]));
        assert_eq!(from_list.len(), 1);
        assert!(AlertNotification::from_payload(serde_json::json!("nope")).is_empty());
        assert!(AlertNotification::from_payload(serde_json::json!({})).is_empty());
    }

    #[test]
    fn test_alert_missing_filters() {
        let alert: NetworkAlert =
            serde_json::from_value(serde_json::json!({ "id": "a3" })).unwrap();
        assert!(alert.filters.ip.is_empty());
        assert!(alert.trigger_names().is_empty());
    }
}
