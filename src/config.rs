//! Layered configuration.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. environment variables prefixed `TELEMETRY_DASHBOARD__`
//!    (e.g. `TELEMETRY_DASHBOARD__SERVER_URL`)
//! 4. command-line flags, applied by the binary
//!
//! ```toml
//! stream_addr = "192.168.1.20:5002"
//! server_url = "http://192.168.1.20:5001"
//! health_interval_ms = 1000
//! groups = [0, 1, 2, 3]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::surface::Layout;

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// `host:port` of the newline-delimited JSON telemetry stream.
    pub stream_addr: String,
    /// Base URL of the telemetry server's HTTP API.
    pub server_url: String,
    pub health_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub reconnect_delay_ms: u64,
    /// Group panels shown on screen.
    pub groups: Vec<u32>,
    /// Replay `GET /data` through the router at startup.
    pub seed_from_snapshot: bool,
    pub log_file: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("stream_addr", "127.0.0.1:5002")?
            .set_default("server_url", "http://127.0.0.1:5001")?
            .set_default("health_interval_ms", 1000)?
            .set_default("request_timeout_ms", 2000)?
            .set_default("reconnect_delay_ms", 1000)?
            .set_default("groups", (0..crate::data::GROUP_COUNT as i64).collect::<Vec<_>>())?
            .set_default("seed_from_snapshot", true)?
            .set_default("log_file", "telemetry-dashboard.log")?
            .set_default("log_filter", "info")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("TELEMETRY_DASHBOARD")
                    .prefix_separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("groups"),
            )
            .build()?;

        config
            .try_deserialize()
            .context("invalid dashboard configuration")
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_millis(self.health_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// Board layout for the configured group panels.
    pub fn layout(&self) -> Layout {
        Layout {
            groups: self.groups.clone(),
            ..Layout::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.server_url, "http://127.0.0.1:5001");
        assert_eq!(settings.health_interval(), Duration::from_secs(1));
        assert_eq!(settings.groups, (0..10).collect::<Vec<u32>>());
        assert!(settings.seed_from_snapshot);
        assert_eq!(settings.layout().groups.len(), 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
stream_addr = "10.1.1.5:7000"
health_interval_ms = 250
groups = [2, 3]
seed_from_snapshot = false
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.stream_addr, "10.1.1.5:7000");
        assert_eq!(settings.health_interval(), Duration::from_millis(250));
        assert_eq!(settings.groups, vec![2, 3]);
        assert!(!settings.seed_from_snapshot);
        // Untouched keys keep their defaults.
        assert_eq!(settings.reconnect_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/dashboard.toml"))).is_err());
    }
}
