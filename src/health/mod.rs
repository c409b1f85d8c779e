//! Server health polling.
//!
//! - [`client`]: HTTP client for the telemetry server (`/health`, `/data`)
//! - [`poller`]: Recurring poll task with an in-flight guard
//!
//! A successful poll produces a [`HealthSnapshot`], which replaces the stats
//! summary on the surface. Failed polls leave the previous summary alone.

pub mod client;
pub mod poller;

pub use client::{HealthProbe, ServerClient, ServerClientBuilder};
pub use poller::HealthPoller;

use serde::{Deserialize, Serialize};

use crate::surface::{Element, Surface};

/// Packet counters reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PacketStats {
    pub packets_received: u64,
    pub packets_processed: u64,
    pub packets_malformed: u64,
}

/// Body of `GET /health`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Server uptime in seconds.
    pub uptime: f64,
    pub stats: PacketStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals_count: Option<u64>,
}

impl HealthSnapshot {
    /// Multi-line summary: uptime followed by the three counters.
    pub fn summary(&self) -> String {
        format!(
            "Uptime: {}\nPackets: {}\nProcessed: {}\nMalformed: {}",
            format_uptime(self.uptime),
            self.stats.packets_received,
            self.stats.packets_processed,
            self.stats.packets_malformed,
        )
    }

    /// Replace the stats summary on the surface.
    pub fn apply<S: Surface>(&self, surface: &mut S) {
        surface.set_text(Element::Stats, &self.summary());
    }
}

/// Format seconds as `<minutes>m <seconds>s`, both floored.
///
/// Negative or non-finite input renders as `0m 0s`.
pub fn format_uptime(uptime: f64) -> String {
    let uptime = if uptime.is_finite() { uptime.max(0.0) } else { 0.0 };
    let minutes = (uptime / 60.0).floor() as u64;
    let seconds = (uptime % 60.0).floor() as u64;
    format!("{}m {}s", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Board;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(125.0), "2m 5s");
        assert_eq!(format_uptime(59.99), "0m 59s");
        assert_eq!(format_uptime(3600.5), "60m 0s");
        assert_eq!(format_uptime(0.0), "0m 0s");
        assert_eq!(format_uptime(-4.0), "0m 0s");
        assert_eq!(format_uptime(f64::NAN), "0m 0s");
    }

    #[test]
    fn test_health_scenario() {
        let json = r#"{
            "status": "ok",
            "uptime": 125,
            "stats": {
                "packets_received": 10,
                "packets_processed": 9,
                "packets_malformed": 1,
                "start_time": 1700000000.5
            },
            "signals_count": 42
        }"#;
        let snapshot: HealthSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.signals_count, Some(42));

        let mut board = Board::default();
        snapshot.apply(&mut board);

        let text = board.text(Element::Stats);
        assert_eq!(text, "Uptime: 2m 5s\nPackets: 10\nProcessed: 9\nMalformed: 1");
    }

    #[test]
    fn test_minimal_body() {
        let json = r#"{"uptime":1.5,"stats":{"packets_received":0,"packets_processed":0,"packets_malformed":0}}"#;
        let snapshot: HealthSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.status.is_none());
        assert_eq!(snapshot.stats, PacketStats::default());
    }

    #[test]
    fn test_missing_stats_is_an_error() {
        assert!(serde_json::from_str::<HealthSnapshot>(r#"{"uptime":3}"#).is_err());
    }
}
