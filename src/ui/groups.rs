//! Groups table: one row per battery group, one column per cell.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::SlotKind;
use crate::surface::GroupPanel;

/// Render every group panel as a table row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let panels = app.board.panels();
    let (voltage_cells, temperature_cells) = panels
        .first()
        .map(|p| (p.voltages.len(), p.temperatures.len()))
        .unwrap_or((0, 0));

    let header = Row::new(
        std::iter::once("Group".to_string())
            .chain((1..=voltage_cells).map(|n| format!("V{}", n)))
            .chain((1..=temperature_cells).map(|n| format!("T{}", n)))
            .map(Cell::from),
    )
    .height(1)
    .style(app.theme.header_style());

    let rows: Vec<Row> = panels.iter().map(|panel| group_row(app, panel)).collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(6))
        .chain(std::iter::repeat(Constraint::Min(6)).take(voltage_cells))
        .chain(std::iter::repeat(Constraint::Min(7)).take(temperature_cells))
        .collect();

    let selected = app.selected_group_index.min(panels.len().saturating_sub(1));
    let title = if panels.is_empty() {
        " Groups ".to_string()
    } else {
        format!(" Groups [{}/{}] ", selected + 1, panels.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(app.theme.panel(&title))
        .column_spacing(1)
        .row_highlight_style(app.theme.selected_style())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !panels.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn group_row<'a>(app: &App, panel: &'a GroupPanel) -> Row<'a> {
    let voltage_style = app.theme.slot_style(SlotKind::Voltage);
    let temperature_style = app.theme.slot_style(SlotKind::Temperature);

    let cell = |text: &'a Option<String>, style: Style| match text {
        Some(t) => Cell::from(t.as_str()).style(style),
        None => Cell::from("-").style(app.theme.placeholder_style()),
    };

    let cells: Vec<Cell> = std::iter::once(Cell::from(format!("#{}", panel.id)))
        .chain(panel.voltages.iter().map(|v| cell(v, voltage_style)))
        .chain(panel.temperatures.iter().map(|t| cell(t, temperature_style)))
        .collect();

    Row::new(cells)
}
