//! Form panel, used for both the create form and the inline editor.

use crate::form::ContactForm;
use crate::state::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rolodex_core::ContactField;

pub fn render(
    f: &mut Frame<'_>,
    app: &App,
    form: &ContactForm,
    title: &str,
    focused: bool,
    area: Rect,
) {
    let mut lines: Vec<Line> = Vec::new();
    for field in ContactField::ALL {
        let active = focused && form.focused_field() == field;
        let marker = if field.is_required() { "*" } else { " " };
        let label_style = if active {
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        let cursor = if active { "_" } else { "" };
        lines.push(Line::from(vec![Span::styled(
            format!("{}{}", field.label(), marker),
            label_style,
        )]));
        lines.push(Line::from(vec![Span::styled(
            format!("  {}{}", form.value(field), cursor),
            Style::default().fg(app.theme.text),
        )]));
    }

    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(app.theme.info),
        )));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(app.theme.error),
        )));
    }

    let border = if focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}
