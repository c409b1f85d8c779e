//! Telemetry events and the latest-value cache.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single named reading pushed by the telemetry server.
///
/// Only `name` and `value` are required on the wire; the server also sends
/// the physical unit and a Unix timestamp (seconds, fractional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl TelemetryEvent {
    /// Create an event with no unit or timestamp.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            unit: None,
            timestamp: None,
        }
    }

    /// Attach a timestamp (seconds since the Unix epoch).
    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Most recent event per signal name.
///
/// Grows to the set of distinct names seen and is never pruned.
#[derive(Debug, Clone, Default)]
pub struct LatestValues {
    values: HashMap<String, TelemetryEvent>,
}

impl LatestValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `event`, replacing any earlier record with the same name.
    pub fn record(&mut self, event: &TelemetryEvent) {
        match self.values.get_mut(&event.name) {
            Some(existing) => existing.clone_from(event),
            None => {
                self.values.insert(event.name.clone(), event.clone());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TelemetryEvent> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all cached records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.values.values()
    }

    /// Serialize the cache as a JSON object keyed by signal name.
    ///
    /// Keys are sorted so exports diff cleanly.
    pub fn to_json(&self) -> serde_json::Value {
        let sorted: std::collections::BTreeMap<&str, &TelemetryEvent> =
            self.values.iter().map(|(k, v)| (k.as_str(), v)).collect();
        serde_json::json!(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_event() {
        let event: TelemetryEvent =
            serde_json::from_str(r#"{"name":"group-1-voltage-3","value":3.91}"#).unwrap();
        assert_eq!(event.name, "group-1-voltage-3");
        assert_eq!(event.value, 3.91);
        assert!(event.unit.is_none());
        assert!(event.timestamp.is_none());
    }

    #[test]
    fn test_deserialize_server_payload() {
        let json = r#"{"name":"group-0-temp-2","value":27.5,"unit":"C","timestamp":1700000000.25}"#;
        let event: TelemetryEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.unit.as_deref(), Some("C"));
        assert_eq!(event.timestamp, Some(1700000000.25));
    }

    #[test]
    fn test_latest_values_keeps_newest() {
        let mut latest = LatestValues::new();
        latest.record(&TelemetryEvent::new("a", 1.0).at(10.0));
        latest.record(&TelemetryEvent::new("b", 2.0));
        latest.record(&TelemetryEvent::new("a", 3.0).at(11.0));

        assert_eq!(latest.len(), 2);
        let a = latest.get("a").unwrap();
        assert_eq!(a.value, 3.0);
        assert_eq!(a.timestamp, Some(11.0));
    }

    #[test]
    fn test_latest_values_json_export() {
        let mut latest = LatestValues::new();
        latest.record(&TelemetryEvent::new("x-motor_rpm", 1200.0));

        let json = latest.to_json();
        assert_eq!(json["x-motor_rpm"]["value"], 1200.0);
        assert!(json["x-motor_rpm"].get("unit").is_none());
    }
}
