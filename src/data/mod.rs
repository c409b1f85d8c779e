//! Data models for the telemetry feed.
//!
//! ## Submodules
//!
//! - [`event`]: Wire-level [`TelemetryEvent`] records and the [`LatestValues`] cache
//! - [`group`]: The fixed [`GroupBank`] of battery groups and their slots
//! - [`signal`]: Signal-name classification and group channel parsing
//!
//! ## Data Flow
//!
//! ```text
//! TelemetryEvent (JSON line)
//!        │
//!        ├──▶ LatestValues::record()
//!        │
//!        ▼
//! signal::classify()
//!        │
//!        ├──▶ Route::Field ──▶ fixed dashboard element
//!        │
//!        └──▶ Route::Group ──▶ signal::parse_channel() ──▶ Group slot
//! ```

pub mod event;
pub mod group;
pub mod signal;

pub use event::{LatestValues, TelemetryEvent};
pub use group::{Group, GroupBank, SlotKind, SlotRef, GROUP_COUNT, TEMPERATURE_SLOTS, VOLTAGE_SLOTS};
pub use signal::{classify, parse_channel, ChannelAddr, Route};
