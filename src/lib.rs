//! # telemetry-dashboard
//!
//! A terminal dashboard for live battery, GPS and motor telemetry.
//!
//! The dashboard connects to a telemetry server that pushes named readings
//! (`group-3-voltage-5 = 3.87`, `bat1-motor_rpm = 1523`, ...) as
//! newline-delimited JSON, routes each reading to the widget it belongs to,
//! and polls the server's `/health` endpoint once a second for uptime and
//! packet counters.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │   app   │───▶│  router  │───▶│ surface │───▶│    ui    │  │
//! │  │ (pump)  │    │  (data)  │    │ (Board) │    │(ratatui) │  │
//! │  └────┬────┘    └──────────┘    └────▲────┘    └──────────┘  │
//! │       │                              │                        │
//! │       ▼                              │                        │
//! │  ┌─────────┐                   ┌─────┴────┐                   │
//! │  │ source  │◀── Stream|Channel │  health  │◀── GET /health    │
//! │  └─────────┘                   └──────────┘                   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Transport abstraction ([`EventSource`]) delivering
//!   connect / disconnect / update events in arrival order
//! - **[`data`]**: Event records, the fixed group model, and signal-name
//!   classification
//! - **[`router`]**: The [`Router`], which owns the group model and the
//!   latest-value cache and writes to the surface
//! - **[`surface`]**: The [`Surface`] trait and the in-memory [`Board`]
//! - **[`health`]**: HTTP client and recurring health poller
//! - **[`ui`]**: Terminal rendering of the board
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! telemetry-dashboard --stream 192.168.1.20:5002 --server http://192.168.1.20:5001
//! ```
//!
//! ### As a library
//!
//! ```
//! use telemetry_dashboard::{Board, Element, Router, TelemetryEvent};
//!
//! let mut router = Router::new();
//! let mut board = Board::default();
//!
//! router.handle(&TelemetryEvent::new("bat1-motor_rpm", 1523.6), &mut board);
//! assert_eq!(board.text(Element::MotorRpm), "1524");
//! ```

pub mod app;
pub mod config;
pub mod connection;
pub mod data;
pub mod error;
pub mod events;
pub mod health;
pub mod router;
pub mod source;
pub mod surface;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use connection::ConnectionState;
pub use data::{Group, GroupBank, LatestValues, SlotKind, SlotRef, TelemetryEvent};
pub use error::{HealthError, RouteError};
pub use health::{HealthPoller, HealthProbe, HealthSnapshot, PacketStats, ServerClient};
pub use router::{Applied, Router};
pub use source::{ChannelSource, EventSource, SourceEvent, StreamSource};
pub use surface::{Board, Element, Layout, StatusClass, Surface};
