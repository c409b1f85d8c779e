//! Stream-based event source.
//!
//! Receives newline-delimited JSON telemetry events from an async byte
//! stream. [`StreamSource::connect`] adds a TCP transport that reconnects on
//! its own whenever the server goes away.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{EventSource, SourceEvent};
use crate::data::TelemetryEvent;

const CHANNEL_CAPACITY: usize = 1024;

/// A source that reads telemetry from an async stream.
///
/// A background task parses each line as a [`TelemetryEvent`] and makes it
/// available via `poll()`. Lines that fail to parse are logged, counted and
/// skipped.
///
/// # Example with a byte stream
///
/// ```
/// use std::io::Cursor;
/// use telemetry_dashboard::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"name\":\"group-1-voltage-1\",\"value\":3.9}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<SourceEvent>,
    description: String,
    malformed: Arc<AtomicU64>,
}

/// Why a line pump stopped.
#[derive(Debug, PartialEq, Eq)]
enum PumpEnd {
    /// EOF or read error on the stream.
    StreamClosed,
    /// Nobody is listening any more.
    ReceiverGone,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Emits `Connected` before the first line and `Disconnected` when the
    /// reader hits EOF or fails.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let malformed = Arc::new(AtomicU64::new(0));
        let counter = malformed.clone();

        tokio::spawn(async move {
            if tx.send(SourceEvent::Connected).await.is_err() {
                return;
            }
            if pump_lines(reader, &tx, &counter).await == PumpEnd::StreamClosed {
                let _ = tx.send(SourceEvent::Disconnected).await;
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            malformed,
        }
    }

    /// Connect to a TCP endpoint, reconnecting after `retry_delay` whenever
    /// the connection cannot be opened or drops.
    ///
    /// Lifecycle events are only sent on transitions: repeated failed
    /// connection attempts do not produce repeated `Disconnected` events.
    pub fn connect(addr: impl Into<String>, retry_delay: Duration) -> Self {
        let addr = addr.into();
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let malformed = Arc::new(AtomicU64::new(0));
        let counter = malformed.clone();
        let description = format!("tcp: {}", addr);

        tokio::spawn(async move {
            loop {
                match TcpStream::connect(&addr).await {
                    Ok(stream) => {
                        info!(%addr, "connected to telemetry stream");
                        if tx.send(SourceEvent::Connected).await.is_err() {
                            break;
                        }
                        if pump_lines(stream, &tx, &counter).await == PumpEnd::ReceiverGone {
                            break;
                        }
                        warn!(%addr, "telemetry stream closed");
                        if tx.send(SourceEvent::Disconnected).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(%addr, "connect failed: {}", e);
                        if tx.is_closed() {
                            break;
                        }
                    }
                }
                tokio::time::sleep(retry_delay).await;
            }
        });

        Self {
            receiver: rx,
            description,
            malformed,
        }
    }

}

/// Forward parsed lines until the stream ends or the receiver goes away.
///
/// A line that is not UTF-8 or not a valid event is counted and skipped.
/// Only EOF or an I/O error ends the pump.
async fn pump_lines<R>(reader: R, tx: &mpsc::Sender<SourceEvent>, malformed: &AtomicU64) -> PumpEnd
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => return PumpEnd::StreamClosed,
            Ok(_) => match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(event)) => {
                    if tx.send(SourceEvent::Update(event)).await.is_err() {
                        return PumpEnd::ReceiverGone;
                    }
                }
                Err(e) => {
                    malformed.fetch_add(1, Ordering::Relaxed);
                    warn!("skipping malformed telemetry line: {}", e);
                }
            },
            Err(e) => {
                warn!("telemetry read error: {}", e);
                return PumpEnd::StreamClosed;
            }
        }
    }
}

/// Decode one raw line. Blank lines yield `None`.
fn parse_line(raw: &[u8]) -> Result<Option<TelemetryEvent>, String> {
    let text = std::str::from_utf8(raw).map_err(|e| format!("invalid UTF-8: {}", e))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some).map_err(|e| e.to_string())
}

impl EventSource for StreamSource {
    fn poll(&mut self) -> Option<SourceEvent> {
        self.receiver.try_recv().ok()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn malformed_count(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }
}
