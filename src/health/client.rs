//! HTTP client for the telemetry server.
//!
//! ```rust,no_run
//! use telemetry_dashboard::health::{HealthProbe, ServerClient};
//!
//! # tokio_test::block_on(async {
//! let client = ServerClient::builder()
//!     .endpoint("http://localhost:5001")
//!     .build()
//!     .unwrap();
//!
//! let health = client.fetch_health().await.unwrap();
//! println!("{}", health.summary());
//! # });
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::HealthSnapshot;
use crate::data::TelemetryEvent;
use crate::error::HealthError;

/// Anything that can answer a health query.
#[async_trait]
pub trait HealthProbe: Send + Sync + 'static {
    async fn fetch_health(&self) -> Result<HealthSnapshot, HealthError>;
}

/// Client for the telemetry server's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct ServerClient {
    client: Client,
    endpoint: String,
}

impl ServerClient {
    pub fn builder() -> ServerClientBuilder {
        ServerClientBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the latest record of every signal from `GET /data`.
    ///
    /// Records are returned oldest first so replaying them leaves the newest
    /// value of each field on screen.
    pub async fn fetch_latest(&self) -> Result<Vec<TelemetryEvent>, HealthError> {
        let records: HashMap<String, TelemetryEvent> = self.get_json("data").await?;
        Ok(replay_order(records.into_values().collect()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HealthError> {
        let url = format!("{}/{}", self.endpoint, path);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(HealthError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| HealthError::Parse(e.to_string()))
    }
}

#[async_trait]
impl HealthProbe for ServerClient {
    async fn fetch_health(&self) -> Result<HealthSnapshot, HealthError> {
        self.get_json("health").await
    }
}

/// Sort records by timestamp, untimestamped first, ties by name.
fn replay_order(mut records: Vec<TelemetryEvent>) -> Vec<TelemetryEvent> {
    records.sort_by(|a, b| {
        let by_time = match (a.timestamp, b.timestamp) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        by_time.then_with(|| a.name.cmp(&b.name))
    });
    records
}

/// Builder for ServerClient.
#[derive(Debug, Default)]
pub struct ServerClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl ServerClientBuilder {
    /// Set the server base URL (e.g., "http://localhost:5001").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 2 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ServerClient, HealthError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(2)))
            .build()?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost:5001".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ServerClient { client, endpoint })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = ServerClient::builder().build().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5001");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = ServerClient::builder()
            .endpoint("http://10.0.0.2:8080/")
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://10.0.0.2:8080");
    }

    #[test]
    fn test_replay_order() {
        let records = vec![
            TelemetryEvent::new("b", 1.0).at(20.0),
            TelemetryEvent::new("a", 2.0).at(10.0),
            TelemetryEvent::new("z", 3.0),
            TelemetryEvent::new("c", 4.0).at(10.0),
        ];

        let names: Vec<_> = replay_order(records).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["z", "a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = ServerClient::builder()
            .endpoint("http://127.0.0.1:9")
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();

        assert!(client.fetch_health().await.is_err());
    }
}
