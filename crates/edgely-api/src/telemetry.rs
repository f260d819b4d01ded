//! Telemetry sample types delivered over the push-subscription channel.
//!
//! The subscription transport owns framing and reconnection; it hands
//! already-decoded JSON frames to consumers as the types here, plus a
//! [`ConnectionStatus`] signal. The chart application consumes samples
//! as-is and carries no protocol logic. The transport authenticates its
//! subscription with [`EdgeClient::session_id`](crate::EdgeClient::session_id).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::num_str;

/// Connection-status signal emitted by the subscription transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Instantaneous throughput for one interface, in bits per second.
///
/// The router sends these as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceTraffic {
    #[serde(default, deserialize_with = "num_str")]
    pub rx_bps: u64,
    #[serde(default, deserialize_with = "num_str")]
    pub tx_bps: u64,
}

/// Per-interface entry in an `export` frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStats {
    #[serde(default)]
    pub stats: InterfaceTraffic,
}

/// CPU / memory / uptime snapshot from a `system-stats` frame.
///
/// `cpu` and `mem` are percentages, `uptime` is seconds; all three
/// arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default, deserialize_with = "num_str")]
    pub cpu: u64,
    #[serde(default, deserialize_with = "num_str")]
    pub mem: u64,
    #[serde(default, deserialize_with = "num_str")]
    pub uptime: u64,
}

/// A decoded subscription frame, tagged by topic.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryMessage {
    /// Per-interface throughput (`export` topic).
    Export(BTreeMap<String, InterfaceStats>),
    /// CPU / memory / uptime (`system-stats` topic).
    SystemStats(SystemStats),
    /// Any topic this crate has no dedicated type for.
    Raw { topic: String, payload: Value },
}

impl TelemetryMessage {
    /// Decode a raw frame by topic. Unknown topics pass through as
    /// [`Raw`](Self::Raw) so nothing from the router is dropped.
    pub fn from_frame(topic: &str, payload: Value) -> Result<Self, serde_json::Error> {
        Ok(match topic {
            "export" => Self::Export(serde_json::from_value(payload)?),
            "system-stats" => Self::SystemStats(serde_json::from_value(payload)?),
            _ => Self::Raw {
                topic: topic.to_owned(),
                payload,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn system_stats_from_string_fields() {
        let msg = TelemetryMessage::from_frame(
            "system-stats",
            json!({ "cpu": "7", "mem": "42", "uptime": "86400" }),
        )
        .expect("decode");

        assert_eq!(
            msg,
            TelemetryMessage::SystemStats(SystemStats {
                cpu: 7,
                mem: 42,
                uptime: 86_400,
            })
        );
    }

    #[test]
    fn export_frame_per_interface() {
        let msg = TelemetryMessage::from_frame(
            "export",
            json!({ "eth0": { "stats": { "rx_bps": "1024", "tx_bps": 512 } } }),
        )
        .expect("decode");

        let TelemetryMessage::Export(interfaces) = msg else {
            panic!("expected Export frame");
        };
        let eth0 = interfaces.get("eth0").expect("eth0 present");
        assert_eq!(eth0.stats.rx_bps, 1024);
        assert_eq!(eth0.stats.tx_bps, 512);
    }

    #[test]
    fn unknown_topic_passes_through_raw() {
        let payload = json!({ "routes": "12" });
        let msg = TelemetryMessage::from_frame("num-routes", payload.clone()).expect("decode");
        assert_eq!(
            msg,
            TelemetryMessage::Raw {
                topic: "num-routes".into(),
                payload,
            }
        );
    }
}
