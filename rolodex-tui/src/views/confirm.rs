//! Delete confirmation modal.

use crate::state::{App, DeleteConfirmation};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, confirm: &DeleteConfirmation) {
    let area = centered(f.size(), 50, 7);
    let lines = vec![
        Line::from(DeleteConfirmation::PROMPT),
        Line::from(confirm.display_name.clone()),
        Line::from(""),
        Line::from("[Enter] Delete   [Esc] Cancel"),
    ];
    let modal = Paragraph::new(lines)
        .block(
            Block::default()
                .title(DeleteConfirmation::TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

/// A box of `width_percent` of the screen width and `height` rows, centered.
fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
