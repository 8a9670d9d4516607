//! Session-level responses: reset acknowledgement and health probe.

use serde::{Deserialize, Serialize};

/// Response of the reset service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetAck {
    /// Service-level success flag.
    pub success: bool,
    /// Optional confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// What the backend currently holds for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// A dataset has been uploaded.
    pub has_data: bool,
    /// Features and labels have been prepared.
    pub has_processed_data: bool,
    /// Train/test partitions exist.
    pub has_split_data: bool,
    /// A fitted model exists.
    pub has_model: bool,
}

/// Response of the health probe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Service status string, `"healthy"` when up.
    pub status: String,
    /// Backend-side session flags.
    #[serde(default)]
    pub session_state: SessionState,
}

impl HealthReport {
    /// Whether the backend reported itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_health_probe() {
        let json = serde_json::json!({
            "status": "healthy",
            "sessionState": {
                "hasData": true,
                "hasProcessedData": true,
                "hasSplitData": false,
                "hasModel": false
            }
        });
        let report: HealthReport = serde_json::from_value(json).unwrap();
        assert!(report.is_healthy());
        assert!(report.session_state.has_processed_data);
        assert!(!report.session_state.has_split_data);
    }

    #[test]
    fn reset_ack_message_is_optional() {
        let ack: ResetAck = serde_json::from_value(serde_json::json!({"success": true})).unwrap();
        assert!(ack.success);
        assert_eq!(ack.message, None);
    }
}
