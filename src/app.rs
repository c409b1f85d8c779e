//! Application state and the event pump.

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::connection::ConnectionState;
use crate::data::TelemetryEvent;
use crate::health::HealthSnapshot;
use crate::router::Router;
use crate::source::{EventSource, SourceEvent};
use crate::surface::{Board, Layout};
use crate::ui::Theme;

/// Upper bound on source events applied per frame, so a flood of telemetry
/// cannot starve input handling and drawing.
const MAX_EVENTS_PER_PUMP: usize = 4096;

/// How long a status-bar message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// Router state and the board are owned here and only touched from the UI
/// loop, one event at a time, in arrival order.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Inputs
    source: Box<dyn EventSource>,
    health_rx: Option<mpsc::Receiver<HealthSnapshot>>,

    // Model and output surface
    pub router: Router,
    pub board: Board,
    pub connection: ConnectionState,
    pub last_event: Option<Instant>,
    pub last_health: Option<Instant>,

    // Navigation (groups table)
    pub selected_group_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`, with the terminal theme
    /// auto-detected.
    pub fn new(source: Box<dyn EventSource>, layout: &Layout) -> Self {
        Self::with_theme(source, layout, Theme::auto_detect())
    }

    pub fn with_theme(source: Box<dyn EventSource>, layout: &Layout, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            health_rx: None,
            router: Router::new(),
            board: Board::new(layout),
            connection: ConnectionState::Disconnected,
            last_event: None,
            last_health: None,
            selected_group_index: 0,
            theme,
            status_message: None,
        }
    }

    /// Attach the receiving end of a health poller.
    pub fn with_health(mut self, rx: mpsc::Receiver<HealthSnapshot>) -> Self {
        self.health_rx = Some(rx);
        self
    }

    /// Returns a description of the current telemetry source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Lines the source has dropped as undecodable.
    pub fn malformed_lines(&self) -> u64 {
        self.source.malformed_count()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Apply everything that is waiting on the source and the health channel.
    ///
    /// Returns the number of items applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;

        while applied < MAX_EVENTS_PER_PUMP {
            let Some(event) = self.source.poll() else {
                break;
            };
            self.apply_source_event(event);
            applied += 1;
        }

        let mut snapshots = Vec::new();
        if let Some(rx) = self.health_rx.as_mut() {
            while let Ok(snapshot) = rx.try_recv() {
                snapshots.push(snapshot);
            }
        }
        for snapshot in &snapshots {
            self.apply_health(snapshot);
        }

        applied + snapshots.len()
    }

    /// Apply one item from the transport.
    pub fn apply_source_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Connected => self.set_connection(ConnectionState::Connected),
            SourceEvent::Disconnected => self.set_connection(ConnectionState::Disconnected),
            SourceEvent::Update(event) => {
                self.router.handle(&event, &mut self.board);
                self.last_event = Some(Instant::now());
            }
        }
    }

    fn set_connection(&mut self, state: ConnectionState) {
        self.connection = state;
        state.apply(&mut self.board);
    }

    /// Replace the stats summary with a fresh health snapshot.
    pub fn apply_health(&mut self, snapshot: &HealthSnapshot) {
        snapshot.apply(&mut self.board);
        self.last_health = Some(Instant::now());
    }

    /// Feed previously recorded events through the router.
    pub fn seed(&mut self, events: &[TelemetryEvent]) {
        for event in events {
            self.router.handle(event, &mut self.board);
        }
        info!("seeded dashboard with {} cached signals", events.len());
    }

    /// Number of group panels on the board.
    fn group_count(&self) -> usize {
        self.board.panels().len()
    }

    /// Move selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.group_count().saturating_sub(1);
        self.selected_group_index = (self.selected_group_index + n).min(max);
    }

    /// Move selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_group_index = self.selected_group_index.saturating_sub(n);
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    pub fn select_first(&mut self) {
        self.selected_group_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_group_index = self.group_count().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Write the latest-value cache to a JSON file.
    pub fn export_latest(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.router.latest().to_json())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
