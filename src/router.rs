//! Telemetry routing.
//!
//! The [`Router`] owns the group model and the latest-value cache. Each
//! incoming event is recorded, classified by name, and written to the
//! surface. Routing failures are never propagated to the caller: malformed
//! names and unknown groups are logged at debug level, out-of-range channel
//! indices are dropped without a log line.

use tracing::debug;

use crate::data::signal::format_field;
use crate::data::{classify, parse_channel, GroupBank, LatestValues, Route, TelemetryEvent};
use crate::error::RouteError;
use crate::surface::{Element, Surface};

/// What an event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A fixed dashboard field was overwritten.
    Field(Element),
    /// A group slot was overwritten and the group re-rendered.
    Group(u32),
}

/// Router state, constructed once per session.
#[derive(Debug, Clone, Default)]
pub struct Router {
    groups: GroupBank,
    latest: LatestValues,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &GroupBank {
        &self.groups
    }

    pub fn latest(&self) -> &LatestValues {
        &self.latest
    }

    /// Process one event. Fire-and-forget: failures are logged, not returned.
    pub fn handle<S: Surface>(&mut self, event: &TelemetryEvent, surface: &mut S) {
        match self.apply(event, surface) {
            Ok(_) => {}
            Err(RouteError::IndexOutOfRange { .. }) => {}
            Err(e) => debug!(signal = %event.name, "dropped telemetry event: {}", e),
        }
    }

    /// Process one event and report what happened.
    pub fn apply<S: Surface>(
        &mut self,
        event: &TelemetryEvent,
        surface: &mut S,
    ) -> Result<Applied, RouteError> {
        self.latest.record(event);

        match classify(&event.name) {
            Route::Field(element) => {
                if let Some(text) = format_field(element, event.value) {
                    surface.set_text(element, &text);
                }
                Ok(Applied::Field(element))
            }
            Route::Group => {
                let addr = parse_channel(&event.name)?;
                let group = self
                    .groups
                    .get_mut(addr.group)
                    .ok_or(RouteError::UnknownGroup(addr.group))?;
                let index = addr.slot_index().ok_or(RouteError::IndexOutOfRange {
                    kind: addr.kind,
                    number: addr.number,
                })?;
                group.set(addr.kind, index, event.value);

                let id = group.id;
                self.render_group(id, surface);
                Ok(Applied::Group(id))
            }
        }
    }

    /// Write every set slot of one group to the surface.
    ///
    /// Idempotent, and touches no other group. Missing panels or cells are
    /// skipped.
    pub fn render_group<S: Surface>(&self, id: u32, surface: &mut S) {
        let Some(group) = self.groups.get(u64::from(id)) else {
            return;
        };
        if !surface.has_group(id) {
            debug!(group = id, "no panel for group, skipping render");
            return;
        }
        for (slot, value) in group.readings() {
            surface.set_slot(id, slot, &slot.kind.format(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SlotRef;
    use crate::surface::{Board, Layout};

    fn cell(board: &Board, group: u32, slot: SlotRef) -> Option<String> {
        board.panel(group)?.cell(slot).map(str::to_string)
    }

    #[test]
    fn test_voltage_scenario() {
        let mut router = Router::new();
        let mut board = Board::default();

        router.handle(&TelemetryEvent::new("group-3-voltage-5", 3.8671), &mut board);

        let group = router.groups().get(3).unwrap();
        assert_eq!(group.voltages[4], Some(3.8671));
        assert_eq!(cell(&board, 3, SlotRef::voltage(5)).as_deref(), Some("3.87V"));
    }

    #[test]
    fn test_temperature_scenario() {
        let mut router = Router::new();
        let mut board = Board::default();

        router.handle(&TelemetryEvent::new("group-0-temp-1", 25.04), &mut board);

        assert_eq!(router.groups().get(0).unwrap().temperatures[0], Some(25.04));
        assert_eq!(cell(&board, 0, SlotRef::temperature(1)).as_deref(), Some("25.0°C"));
    }

    #[test]
    fn test_motor_rpm_scenario() {
        let mut router = Router::new();
        let mut board = Board::default();

        let applied = router.apply(&TelemetryEvent::new("bat1-motor_rpm", 1523.6), &mut board);

        assert_eq!(applied, Ok(Applied::Field(Element::MotorRpm)));
        assert_eq!(board.text(Element::MotorRpm), "1524");
    }

    #[test]
    fn test_motor_fields_have_units() {
        let mut router = Router::new();
        let mut board = Board::default();

        router.handle(&TelemetryEvent::new("group-1-motor_temp", 48.26), &mut board);
        router.handle(&TelemetryEvent::new("group-1-motor_current", 110.0), &mut board);
        router.handle(&TelemetryEvent::new("group-1-motor_torque", 35.57), &mut board);

        assert_eq!(board.text(Element::MotorTemp), "48.3°C");
        assert_eq!(board.text(Element::MotorCurrent), "110.0A");
        assert_eq!(board.text(Element::MotorTorque), "35.6Nm");
    }

    #[test]
    fn test_gps_takes_priority() {
        let mut router = Router::new();
        let mut board = Board::default();

        router.handle(&TelemetryEvent::new("group-3-latitude", 52.2296756), &mut board);
        router.handle(&TelemetryEvent::new("anything-longitude", -0.1), &mut board);

        assert_eq!(board.text(Element::GpsLatitude), "52.2296756");
        assert_eq!(board.text(Element::GpsLongitude), "-0.1000000");
        assert!(router.groups().get(3).unwrap().readings().next().is_none());
    }

    #[test]
    fn test_every_valid_voltage_channel() {
        let mut router = Router::new();
        let mut board = Board::default();

        for g in 0..10u32 {
            for i in 1..=12usize {
                let value = 3.0 + (i as f64) / 100.0;
                router.handle(&TelemetryEvent::new(format!("group-{g}-voltage-{i}"), value), &mut board);
                assert_eq!(router.groups().get(u64::from(g)).unwrap().voltages[i - 1], Some(value));
                assert_eq!(
                    cell(&board, g, SlotRef::voltage(i)),
                    Some(format!("{:.2}V", value))
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut router = Router::new();
        let mut board = Board::default();
        let before = router.groups().clone();

        for name in [
            "group-1-voltage-0",
            "group-1-voltage-13",
            "group-1-temp-0",
            "group-1-temp-6",
            "group-1-temperature-99",
        ] {
            let result = router.apply(&TelemetryEvent::new(name, 1.0), &mut board);
            assert!(matches!(result, Err(RouteError::IndexOutOfRange { .. })), "{name}");
        }

        assert_eq!(router.groups().get(1), before.get(1));
        assert!(board.panel(1).unwrap().voltages.iter().all(Option::is_none));
    }

    #[test]
    fn test_unknown_group_is_noop() {
        let mut router = Router::new();
        let mut board = Board::default();

        let result = router.apply(&TelemetryEvent::new("group-10-voltage-1", 3.9), &mut board);
        assert_eq!(result, Err(RouteError::UnknownGroup(10)));
        assert!(router.groups().iter().all(|g| g.readings().next().is_none()));
    }

    #[test]
    fn test_malformed_name_changes_nothing() {
        let mut router = Router::new();
        let mut board = Board::default();
        let before = board.clone();

        router.handle(&TelemetryEvent::new("foo-bar", 1.0), &mut board);

        for element in Element::ALL {
            assert_eq!(board.text(element), before.text(element));
        }
        assert_eq!(board.panels(), before.panels());
        // Still cached as the latest value for that name.
        assert_eq!(router.latest().get("foo-bar").unwrap().value, 1.0);
    }

    #[test]
    fn test_repeated_event_is_idempotent() {
        let event = TelemetryEvent::new("group-5-voltage-2", 4.019);

        let mut once = Board::default();
        let mut router = Router::new();
        router.handle(&event, &mut once);

        let mut twice = Board::default();
        let mut router = Router::new();
        router.handle(&event, &mut twice);
        router.handle(&event, &mut twice);

        assert_eq!(once.panels(), twice.panels());
    }

    #[test]
    fn test_render_touches_only_affected_group() {
        let mut router = Router::new();
        let mut board = Board::default();

        router.handle(&TelemetryEvent::new("group-2-voltage-1", 3.5), &mut board);
        router.handle(&TelemetryEvent::new("group-4-temp-3", 19.96), &mut board);

        assert_eq!(cell(&board, 2, SlotRef::voltage(1)).as_deref(), Some("3.50V"));
        assert_eq!(cell(&board, 4, SlotRef::temperature(3)).as_deref(), Some("20.0°C"));
        let untouched = board.panels().iter().filter(|p| p.id != 2 && p.id != 4);
        for panel in untouched {
            assert!(panel.voltages.iter().chain(&panel.temperatures).all(Option::is_none));
        }
    }

    #[test]
    fn test_missing_panel_still_updates_model() {
        let layout = Layout {
            groups: vec![0],
            ..Layout::default()
        };
        let mut router = Router::new();
        let mut board = Board::new(&layout);

        let applied = router.apply(&TelemetryEvent::new("group-6-voltage-3", 3.3), &mut board);

        assert_eq!(applied, Ok(Applied::Group(6)));
        assert_eq!(router.groups().get(6).unwrap().voltages[2], Some(3.3));
        assert!(board.panel(6).is_none());
    }
}
