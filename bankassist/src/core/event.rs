//! Pipeline event type emitted while a run advances.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An event emitted by the stepper.
///
/// Events are consumed by event sinks for logging, monitoring, or tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// The event type (e.g., "stage.started", "run.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl PipelineEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Returns the payload as a JSON object, timestamp included.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        let mut map: serde_json::Map<String, serde_json::Value> =
            self.data.clone().into_iter().collect();
        map.insert("timestamp".to_string(), serde_json::json!(self.timestamp));
        serde_json::Value::Object(map)
    }

    /// Creates a "stage.started" event.
    #[must_use]
    pub fn stage_started(case_id: &str, stage: &str, progress: u8) -> Self {
        Self::new("stage.started")
            .add_data("case_id", serde_json::json!(case_id))
            .add_data("stage", serde_json::json!(stage))
            .add_data("progress", serde_json::json!(progress))
    }

    /// Creates a "stage.progress" event.
    #[must_use]
    pub fn stage_progress(case_id: &str, stage: &str, progress: u8) -> Self {
        Self::new("stage.progress")
            .add_data("case_id", serde_json::json!(case_id))
            .add_data("stage", serde_json::json!(stage))
            .add_data("progress", serde_json::json!(progress))
    }

    /// Creates a "stage.completed" event.
    #[must_use]
    pub fn stage_completed(case_id: &str, stage: &str, elapsed_seconds: f64) -> Self {
        Self::new("stage.completed")
            .add_data("case_id", serde_json::json!(case_id))
            .add_data("stage", serde_json::json!(stage))
            .add_data("elapsed_seconds", serde_json::json!(elapsed_seconds))
    }

    /// Creates a "run.completed" event.
    #[must_use]
    pub fn run_completed(case_id: &str, stage_count: usize) -> Self {
        Self::new("run.completed")
            .add_data("case_id", serde_json::json!(case_id))
            .add_data("stages", serde_json::json!(stage_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_started() {
        let event = PipelineEvent::stage_started("CS-2024-001", "intake", 10);
        assert_eq!(event.event_type, "stage.started");
        assert_eq!(event.data.get("stage"), Some(&serde_json::json!("intake")));
        assert_eq!(event.data.get("progress"), Some(&serde_json::json!(10)));
    }

    #[test]
    fn test_payload_includes_timestamp() {
        let payload = PipelineEvent::run_completed("CS-2024-001", 8).payload();
        assert_eq!(payload["case_id"], "CS-2024-001");
        assert_eq!(payload["stages"], 8);
        assert!(payload["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_serialize_renames_type() {
        let json = serde_json::to_value(PipelineEvent::new("custom")).unwrap();
        assert_eq!(json["type"], "custom");
    }
}
