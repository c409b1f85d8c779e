//! Colors for the dashboard, chosen per board role.
//!
//! The board only has a handful of things to color: the connection status,
//! the two kinds of group cell, fields that have not been written yet, and
//! panel chrome. A [`Theme`] holds one color per role and derives every
//! widget style from them.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use ratatui::widgets::{Block, Borders};

use crate::data::SlotKind;
use crate::surface::StatusClass;

/// One color per thing the board draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Titles, header rows and transient messages.
    pub accent: Color,
    pub connected: Color,
    pub disconnected: Color,
    pub voltage: Color,
    pub temperature: Color,
    /// Cells and fields with no reading yet.
    pub placeholder: Color,
    /// Background of the selected group row.
    pub selection: Color,
    pub border: Color,
}

impl Theme {
    /// For dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            connected: Color::Green,
            disconnected: Color::Red,
            voltage: Color::LightYellow,
            temperature: Color::LightMagenta,
            placeholder: Color::DarkGray,
            selection: Color::DarkGray,
            border: Color::Gray,
        }
    }

    /// For light terminal backgrounds. Yellow is unreadable on white, so
    /// voltages get a dark amber.
    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            voltage: Color::Rgb(150, 110, 0),
            temperature: Color::Magenta,
            placeholder: Color::Gray,
            selection: Color::LightBlue,
            border: Color::DarkGray,
            ..Self::dark()
        }
    }

    /// Pick by terminal background luma, falling back to dark.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the status label's class. Disconnected is bold so it stands
    /// out when the link drops.
    pub fn status_style(&self, class: StatusClass) -> Style {
        match class {
            StatusClass::Connected => Style::default().fg(self.connected),
            StatusClass::Disconnected => {
                Style::default().fg(self.disconnected).add_modifier(Modifier::BOLD)
            }
        }
    }

    pub fn slot_style(&self, kind: SlotKind) -> Style {
        let color = match kind {
            SlotKind::Voltage => self.voltage,
            SlotKind::Temperature => self.temperature,
        };
        Style::default().fg(color)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(self.placeholder)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().bg(self.selection).add_modifier(Modifier::BOLD)
    }

    /// Bordered panel with the given title.
    pub fn panel<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
