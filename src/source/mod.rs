//! Event source abstraction for receiving telemetry.
//!
//! This module provides a trait-based abstraction over the transport that
//! delivers telemetry events (TCP streams, arbitrary async readers, or
//! in-process channels). Every source reports connection lifecycle changes
//! in-band, so updates and connect/disconnect transitions arrive in one
//! ordered sequence.

mod channel;
mod stream;

pub use channel::ChannelSource;
pub use stream::StreamSource;

use std::fmt::Debug;

use crate::data::TelemetryEvent;

/// One item from the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    /// The transport (re)connected.
    Connected,
    /// The transport lost its connection.
    Disconnected,
    /// A telemetry reading.
    Update(TelemetryEvent),
}

/// Trait for receiving telemetry from various transports.
///
/// # Example
///
/// ```
/// use telemetry_dashboard::{ChannelSource, EventSource, SourceEvent};
///
/// let (tx, mut source) = ChannelSource::create("example");
/// tx.try_send(SourceEvent::Connected).unwrap();
/// assert_eq!(source.poll(), Some(SourceEvent::Connected));
/// ```
pub trait EventSource: Send + Debug {
    /// Take the next pending event, in arrival order.
    ///
    /// Returns `None` when nothing is waiting. Must not block.
    fn poll(&mut self) -> Option<SourceEvent>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;

    /// Number of incoming lines dropped because they could not be decoded.
    ///
    /// Sources that receive already-typed events never drop anything.
    fn malformed_count(&self) -> u64 {
        0
    }
}
