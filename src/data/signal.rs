//! Signal-name classification.
//!
//! Names are matched against an ordered suffix table first (GPS, then motor
//! metrics). Anything left over is treated as a group channel and must have
//! the exact shape `group-<id>-<kind>-<index>`.

use crate::error::RouteError;
use crate::surface::Element;

use super::group::SlotKind;

/// Suffix routes in priority order. First match wins.
const SUFFIX_ROUTES: [(&str, Element); 6] = [
    ("-latitude", Element::GpsLatitude),
    ("-longitude", Element::GpsLongitude),
    ("motor_rpm", Element::MotorRpm),
    ("motor_temp", Element::MotorTemp),
    ("motor_current", Element::MotorCurrent),
    ("motor_torque", Element::MotorTorque),
];

/// Where an event should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A fixed dashboard field.
    Field(Element),
    /// A group-scoped channel; parse with [`parse_channel`].
    Group,
}

/// Classify a signal name. Never fails: unknown shapes fall through to
/// [`Route::Group`].
pub fn classify(name: &str) -> Route {
    SUFFIX_ROUTES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, element)| Route::Field(*element))
        .unwrap_or(Route::Group)
}

/// Format a value for one of the fixed fields.
///
/// Returns `None` for elements that do not carry a telemetry reading.
pub fn format_field(element: Element, value: f64) -> Option<String> {
    let text = match element {
        Element::GpsLatitude | Element::GpsLongitude => format!("{:.7}", value),
        Element::MotorRpm => format!("{:.0}", value),
        Element::MotorTemp => format!("{:.1}°C", value),
        Element::MotorCurrent => format!("{:.1}A", value),
        Element::MotorTorque => format!("{:.1}Nm", value),
        Element::Status | Element::Stats => return None,
    };
    Some(text)
}

/// A parsed `group-<id>-<kind>-<index>` name.
///
/// `number` is the raw 1-based index from the name; range checking against
/// the group's slot capacity happens when the channel is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelAddr {
    pub group: u64,
    pub kind: SlotKind,
    pub number: u64,
}

impl ChannelAddr {
    /// 0-based slot index, if it fits the kind's capacity.
    pub fn slot_index(&self) -> Option<usize> {
        let index = usize::try_from(self.number.checked_sub(1)?).ok()?;
        (index < self.kind.capacity()).then_some(index)
    }
}

/// Parse a group channel name.
///
/// Accepts `voltage`, `temperature` and the short `temp` spelling for the
/// kind. Integer fields saturate instead of failing on overflow, so a huge
/// index is reported as out of range rather than malformed.
pub fn parse_channel(name: &str) -> Result<ChannelAddr, RouteError> {
    let malformed = || RouteError::MalformedName(name.to_string());

    let rest = name.strip_prefix("group-").ok_or_else(malformed)?;
    let mut parts = rest.split('-');
    let (Some(id), Some(kind), Some(index), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let kind = match kind {
        "voltage" => SlotKind::Voltage,
        "temperature" | "temp" => SlotKind::Temperature,
        _ => return Err(malformed()),
    };

    Ok(ChannelAddr {
        group: parse_digits(id).ok_or_else(malformed)?,
        kind,
        number: parse_digits(index).ok_or_else(malformed)?,
    })
}

/// Parse an unsigned decimal made only of ASCII digits, saturating at
/// `u64::MAX`.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(u64::MAX))
}
