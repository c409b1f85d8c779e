//! Channel-based event source.
//!
//! Receives events pushed by another part of the process through a tokio
//! mpsc channel. Useful for embedding the dashboard next to whatever decodes
//! the raw telemetry, and for tests.

use tokio::sync::mpsc;

use super::{EventSource, SourceEvent};

/// Default channel capacity used by [`ChannelSource::create`].
const CHANNEL_CAPACITY: usize = 1024;

/// A source that receives events via a channel.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<SourceEvent>,
    description: String,
}

impl ChannelSource {
    /// Wrap an existing receiver.
    pub fn new(receiver: mpsc::Receiver<SourceEvent>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for sending events to a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::Sender<SourceEvent>, Self) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (tx, Self::new(rx, source_description))
    }
}

impl EventSource for ChannelSource {
    fn poll(&mut self) -> Option<SourceEvent> {
        self.receiver.try_recv().ok()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TelemetryEvent;

    #[test]
    fn test_channel_source_preserves_order() {
        let (tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());

        tx.try_send(SourceEvent::Connected).unwrap();
        tx.try_send(SourceEvent::Update(TelemetryEvent::new("a", 1.0))).unwrap();
        tx.try_send(SourceEvent::Update(TelemetryEvent::new("b", 2.0))).unwrap();
        tx.try_send(SourceEvent::Disconnected).unwrap();

        assert_eq!(source.poll(), Some(SourceEvent::Connected));
        assert_eq!(
            source.poll(),
            Some(SourceEvent::Update(TelemetryEvent::new("a", 1.0)))
        );
        assert_eq!(
            source.poll(),
            Some(SourceEvent::Update(TelemetryEvent::new("b", 2.0)))
        );
        assert_eq!(source.poll(), Some(SourceEvent::Disconnected));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("decoder");
        assert_eq!(source.description(), "channel: decoder");
    }

    #[test]
    fn test_poll_after_sender_dropped() {
        let (tx, mut source) = ChannelSource::create("test");
        drop(tx);
        assert!(source.poll().is_none());
    }
}
