//! Overview row: server stats, GPS position and motor metrics.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::surface::Element;

/// Render the three overview panels side by side.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Fill(1), // Server stats
        Constraint::Fill(1), // GPS
        Constraint::Fill(1), // Motor
    ])
    .split(area);

    let stats = app.board.text(Element::Stats);
    let stats_lines: Vec<Line> = if stats.is_empty() {
        vec![Line::from(Span::styled("Waiting for health check...", app.theme.placeholder_style()))]
    } else {
        stats.lines().map(|l| Line::from(l.to_string())).collect()
    };
    frame.render_widget(Paragraph::new(stats_lines).block(app.theme.panel(" Server ")), chunks[0]);

    let gps = vec![
        field_line(app, "Latitude ", Element::GpsLatitude),
        field_line(app, "Longitude", Element::GpsLongitude),
    ];
    frame.render_widget(Paragraph::new(gps).block(app.theme.panel(" GPS ")), chunks[1]);

    let motor = vec![
        field_line(app, "RPM    ", Element::MotorRpm),
        field_line(app, "Temp   ", Element::MotorTemp),
        field_line(app, "Current", Element::MotorCurrent),
        field_line(app, "Torque ", Element::MotorTorque),
    ];
    frame.render_widget(Paragraph::new(motor).block(app.theme.panel(" Motor ")), chunks[2]);
}

/// `label  value`, with a dimmed placeholder until the field is written.
fn field_line(app: &App, label: &'static str, element: Element) -> Line<'static> {
    let text = app.board.text(element);
    let value = if text.is_empty() {
        Span::styled("--", app.theme.placeholder_style())
    } else {
        Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD))
    };
    Line::from(vec![Span::raw(format!("{}  ", label)), value])
}
