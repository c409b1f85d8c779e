//! Battery group model: fixed voltage and temperature slots per group.

use std::fmt;

/// Number of groups created at startup (ids `0..GROUP_COUNT`).
pub const GROUP_COUNT: usize = 10;

/// Cell voltage channels per group.
pub const VOLTAGE_SLOTS: usize = 12;

/// Temperature channels per group.
pub const TEMPERATURE_SLOTS: usize = 5;

/// Channel family within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Voltage,
    Temperature,
}

impl SlotKind {
    /// Number of slots of this kind in every group.
    pub fn capacity(self) -> usize {
        match self {
            SlotKind::Voltage => VOLTAGE_SLOTS,
            SlotKind::Temperature => TEMPERATURE_SLOTS,
        }
    }

    /// Class-name prefix of the on-screen cell (`voltage-<n>` / `temp-<n>`).
    pub fn class_prefix(self) -> &'static str {
        match self {
            SlotKind::Voltage => "voltage",
            SlotKind::Temperature => "temp",
        }
    }

    /// Format a reading the way the dashboard shows it.
    pub fn format(self, value: f64) -> String {
        match self {
            SlotKind::Voltage => format!("{:.2}V", value),
            SlotKind::Temperature => format!("{:.1}°C", value),
        }
    }
}

/// Address of one on-screen cell inside a group panel.
///
/// `number` is 1-based, matching the `voltage-<n>` / `temp-<n>` class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub kind: SlotKind,
    pub number: usize,
}

impl SlotRef {
    pub fn voltage(number: usize) -> Self {
        Self {
            kind: SlotKind::Voltage,
            number,
        }
    }

    pub fn temperature(number: usize) -> Self {
        Self {
            kind: SlotKind::Temperature,
            number,
        }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.class_prefix(), self.number)
    }
}

/// One battery group. Slots start unset and are overwritten in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: u32,
    pub voltages: [Option<f64>; VOLTAGE_SLOTS],
    pub temperatures: [Option<f64>; TEMPERATURE_SLOTS],
}

impl Group {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            voltages: [None; VOLTAGE_SLOTS],
            temperatures: [None; TEMPERATURE_SLOTS],
        }
    }

    /// Overwrite a 0-based slot.
    ///
    /// Returns `false` without touching the group if `index` is out of range
    /// for `kind`.
    pub fn set(&mut self, kind: SlotKind, index: usize, value: f64) -> bool {
        let slots: &mut [Option<f64>] = match kind {
            SlotKind::Voltage => &mut self.voltages,
            SlotKind::Temperature => &mut self.temperatures,
        };
        match slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, kind: SlotKind, index: usize) -> Option<f64> {
        match kind {
            SlotKind::Voltage => self.voltages.get(index).copied().flatten(),
            SlotKind::Temperature => self.temperatures.get(index).copied().flatten(),
        }
    }

    /// All set slots as (cell address, reading) pairs, voltages first.
    pub fn readings(&self) -> impl Iterator<Item = (SlotRef, f64)> + '_ {
        let voltages = self
            .voltages
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (SlotRef::voltage(i + 1), v)));
        let temperatures = self
            .temperatures
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (SlotRef::temperature(i + 1), t)));
        voltages.chain(temperatures)
    }
}

/// The fixed set of groups, created once with every slot unset.
#[derive(Debug, Clone)]
pub struct GroupBank {
    groups: Vec<Group>,
}

impl Default for GroupBank {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupBank {
    pub fn new() -> Self {
        Self {
            groups: (0..GROUP_COUNT as u32).map(Group::new).collect(),
        }
    }

    pub fn get(&self, id: u64) -> Option<&Group> {
        usize::try_from(id).ok().and_then(|i| self.groups.get(i))
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Group> {
        usize::try_from(id).ok().and_then(|i| self.groups.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }
}
