//! Output surface abstraction.
//!
//! Everything the dashboard shows is text written into uniquely identified
//! elements. The router, health poller and connection indicator only talk to
//! the [`Surface`] trait; the terminal frontend draws whatever the [`Board`]
//! holds.
//!
//! Writes to elements that do not exist are skipped and reported back as
//! `false`, never as an error.

use std::collections::BTreeMap;
use std::fmt;

use crate::data::{SlotKind, SlotRef, TEMPERATURE_SLOTS, VOLTAGE_SLOTS};

/// Fixed, uniquely identified elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Status,
    Stats,
    GpsLatitude,
    GpsLongitude,
    MotorRpm,
    MotorTemp,
    MotorCurrent,
    MotorTorque,
}

impl Element {
    /// All fixed elements, in display order.
    pub const ALL: [Element; 8] = [
        Element::Status,
        Element::Stats,
        Element::GpsLatitude,
        Element::GpsLongitude,
        Element::MotorRpm,
        Element::MotorTemp,
        Element::MotorCurrent,
        Element::MotorTorque,
    ];

    /// The element's id.
    pub fn id(&self) -> &'static str {
        match self {
            Element::Status => "status",
            Element::Stats => "stats",
            Element::GpsLatitude => "gps-latitude",
            Element::GpsLongitude => "gps-longitude",
            Element::MotorRpm => "motor-rpm",
            Element::MotorTemp => "motor-temp",
            Element::MotorCurrent => "motor-current",
            Element::MotorTorque => "motor-torque",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Style classifier of the status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusClass {
    Connected,
    #[default]
    Disconnected,
}

impl StatusClass {
    /// Class attribute value.
    pub fn class_name(&self) -> &'static str {
        match self {
            StatusClass::Connected => "status connected",
            StatusClass::Disconnected => "status disconnected",
        }
    }
}

/// Somewhere the dashboard can write text.
pub trait Surface {
    /// Replace the text of a fixed element. Returns `false` if it is absent.
    fn set_text(&mut self, element: Element, text: &str) -> bool;

    /// Replace the status label's style class.
    fn set_status_class(&mut self, class: StatusClass);

    /// Whether a panel for `group` exists.
    fn has_group(&self, group: u32) -> bool;

    /// Replace the text of one cell in a group panel. Returns `false` if the
    /// panel or the cell is absent.
    fn set_slot(&mut self, group: u32, slot: SlotRef, text: &str) -> bool;
}

/// Which elements exist on the board.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Group panels to create, in display order.
    pub groups: Vec<u32>,
    /// Voltage cells per panel.
    pub voltage_cells: usize,
    /// Temperature cells per panel.
    pub temperature_cells: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            groups: (0..crate::data::GROUP_COUNT as u32).collect(),
            voltage_cells: VOLTAGE_SLOTS,
            temperature_cells: TEMPERATURE_SLOTS,
        }
    }
}

/// Text cells of one group panel. Cells hold `None` until first written.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPanel {
    pub id: u32,
    pub voltages: Vec<Option<String>>,
    pub temperatures: Vec<Option<String>>,
}

impl GroupPanel {
    fn new(id: u32, layout: &Layout) -> Self {
        Self {
            id,
            voltages: vec![None; layout.voltage_cells],
            temperatures: vec![None; layout.temperature_cells],
        }
    }

    /// Text of a cell, if the cell exists and has been written.
    pub fn cell(&self, slot: SlotRef) -> Option<&str> {
        self.cell_slot(slot)?.as_deref()
    }

    fn cell_slot(&self, slot: SlotRef) -> Option<&Option<String>> {
        let cells = match slot.kind {
            SlotKind::Voltage => &self.voltages,
            SlotKind::Temperature => &self.temperatures,
        };
        cells.get(slot.number.checked_sub(1)?)
    }

    fn cell_mut(&mut self, slot: SlotRef) -> Option<&mut Option<String>> {
        let cells = match slot.kind {
            SlotKind::Voltage => &mut self.voltages,
            SlotKind::Temperature => &mut self.temperatures,
        };
        cells.get_mut(slot.number.checked_sub(1)?)
    }
}

/// In-memory surface drawn by the terminal frontend.
#[derive(Debug, Clone)]
pub struct Board {
    fields: BTreeMap<Element, String>,
    status_class: StatusClass,
    panels: Vec<GroupPanel>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&Layout::default())
    }
}

impl Board {
    /// Create a board with every fixed element and the panels in `layout`.
    ///
    /// The status label starts out as `Disconnected`.
    pub fn new(layout: &Layout) -> Self {
        let mut fields: BTreeMap<Element, String> =
            Element::ALL.iter().map(|e| (*e, String::new())).collect();
        fields.insert(Element::Status, "Disconnected".to_string());

        let mut seen = std::collections::HashSet::new();
        let panels = layout
            .groups
            .iter()
            .filter(|id| seen.insert(**id))
            .map(|id| GroupPanel::new(*id, layout))
            .collect();

        Self {
            fields,
            status_class: StatusClass::default(),
            panels,
        }
    }

    /// Current text of a fixed element.
    pub fn text(&self, element: Element) -> &str {
        self.fields.get(&element).map(String::as_str).unwrap_or("")
    }

    pub fn status_class(&self) -> StatusClass {
        self.status_class
    }

    /// Group panels in display order.
    pub fn panels(&self) -> &[GroupPanel] {
        &self.panels
    }

    pub fn panel(&self, group: u32) -> Option<&GroupPanel> {
        self.panels.iter().find(|p| p.id == group)
    }
}

impl Surface for Board {
    fn set_text(&mut self, element: Element, text: &str) -> bool {
        match self.fields.get_mut(&element) {
            Some(field) => {
                field.clear();
                field.push_str(text);
                true
            }
            None => false,
        }
    }

    fn set_status_class(&mut self, class: StatusClass) {
        self.status_class = class;
    }

    fn has_group(&self, group: u32) -> bool {
        self.panel(group).is_some()
    }

    fn set_slot(&mut self, group: u32, slot: SlotRef, text: &str) -> bool {
        let Some(panel) = self.panels.iter_mut().find(|p| p.id == group) else {
            return false;
        };
        match panel.cell_mut(slot) {
            Some(cell) => {
                *cell = Some(text.to_string());
                true
            }
            None => false,
        }
    }
}
