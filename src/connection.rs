//! Connection status indicator.

use tracing::info;

use crate::surface::{Element, StatusClass, Surface};

/// Transport state as shown to the user. There is no reconnecting state;
/// the label flips directly between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }

    pub fn class(&self) -> StatusClass {
        match self {
            ConnectionState::Connected => StatusClass::Connected,
            ConnectionState::Disconnected => StatusClass::Disconnected,
        }
    }

    /// Overwrite the status label text and its style class.
    pub fn apply<S: Surface>(&self, surface: &mut S) {
        info!("telemetry transport {}", self.label().to_lowercase());
        surface.set_text(Element::Status, self.label());
        surface.set_status_class(self.class());
    }
}
