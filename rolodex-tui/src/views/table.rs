//! Contact table with sort indicators and a pagination line.

use crate::state::App;
use crate::table::PAGE_SIZE_OPTIONS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use rolodex_core::ContactField;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let sort = app.list.sort;
    let header = Row::new(ContactField::ALL.iter().enumerate().map(|(i, field)| {
        let marker = if *field == sort.column {
            format!(" {}", sort.direction.arrow())
        } else {
            String::new()
        };
        Cell::from(format!("{} {}{}", i + 1, field.label(), marker))
    }))
    .style(
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .visible_rows()
        .into_iter()
        .map(|contact| {
            Row::new(
                ContactField::ALL
                    .iter()
                    .map(|field| Cell::from(contact.field(*field).to_string())),
            )
        })
        .collect();

    let widths = [Constraint::Ratio(1, 6); 6];
    let title = if app.cache.is_loaded() || !app.loading {
        "Contacts"
    } else {
        "Contacts (loading)"
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .highlight_style(
            Style::default()
                .fg(app.theme.secondary)
                .bg(app.theme.highlight_bg),
        );

    let mut state = TableState::default();
    if app.selected_contact().is_some() {
        state.select(Some(app.list.selected));
    }
    f.render_stateful_widget(table, chunks[0], &mut state);

    let pagination = &app.list.pagination;
    let total = app.cache.len();
    let start = pagination.page() * pagination.page_size();
    let shown = app.visible_rows().len();
    let range = if shown == 0 {
        format!("0 of {}", total)
    } else {
        format!("{}-{} of {}", start + 1, start + shown, total)
    };
    let sizes: Vec<String> = PAGE_SIZE_OPTIONS
        .iter()
        .map(|size| {
            if *size == pagination.page_size() {
                format!("[{}]", size)
            } else {
                size.to_string()
            }
        })
        .collect();
    let footer = format!(
        "Rows per page: {} | {} | page {}/{}",
        sizes.join(" "),
        range,
        pagination.page() + 1,
        app.page_count().max(1)
    );
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(app.theme.text_dim)),
        chunks[1],
    );
}
