//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::surface::Element;

/// Render the header bar with connection status.
///
/// Displays: status label styled by its class, source, signal count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status_style = app.theme.status_style(app.board.status_class());

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled(app.board.text(Element::Status).to_string(), status_style),
        Span::raw(" │ "),
        Span::styled("TELEMETRY ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", app.router.latest().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" signals"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since last telemetry and health update, dropped lines if
/// any, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.accent));
        frame.render_widget(paragraph, area);
        return;
    }

    let age = |t: Option<std::time::Instant>| {
        t.map(|t| format!("{:.1}s ago", t.elapsed().as_secs_f64()))
            .unwrap_or_else(|| "never".to_string())
    };

    let dropped = match app.malformed_lines() {
        0 => String::new(),
        n => format!(" | Malformed {}", n),
    };

    let status = format!(
        " Telemetry {} | Health {}{} | ↑↓:select e:export ?:help q:quit",
        age(app.last_event),
        age(app.last_health),
        dropped,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header_style())]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Groups",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Select group"),
        Line::from("  PgUp/PgDn   Jump 5 groups"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e           Export latest values"),
        Line::from("  q / Esc     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = app.theme.panel(" Help ").border_style(Style::default().fg(app.theme.accent));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
