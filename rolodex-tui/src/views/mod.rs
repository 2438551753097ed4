//! View rendering dispatch.

pub mod confirm;
pub mod form;
pub mod table;

use crate::state::{App, Focus, ListPanel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(layout[1]);

    form::render(
        f,
        app,
        &app.create_form,
        "Add Contact",
        app.focus == Focus::Form && !app.is_editing(),
        body[0],
    );
    match &app.list.panel {
        ListPanel::Table => table::render(f, app, body[1]),
        ListPanel::Edit(editor) => form::render(f, app, editor, "Edit Contact", true, body[1]),
    }

    render_footer(f, app, layout[2]);

    if let Some(confirm) = &app.confirm {
        confirm::render(f, app, confirm);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let status = if app.loading {
        "Loading...".to_string()
    } else {
        format!("{} contacts", app.cache.len())
    };
    let title = format!("Rolodex | {} | {}", app.config.api_base_url, status);
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.input_mode() {
        crate::keys::InputMode::Confirming => "Enter/y delete • Esc/n cancel",
        crate::keys::InputMode::Editing => "Tab next field • Enter save • Esc cancel",
        crate::keys::InputMode::Navigate => {
            "j/k move • h/l page • p page size • 1-6 sort • a add • e edit • d delete • r refresh • q quit"
        }
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(app.theme.notification_color(note.level)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
