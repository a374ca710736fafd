//! Endpoint settings view

use super::field_renderer::{draw_text_field, FieldSpec};
use crate::app::App;
use crate::config::ENDPOINT_ENV_VAR;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const ENDPOINT_FIELD: FieldSpec<'static> = FieldSpec {
    label: "Web app URL",
    placeholder: "https://script.google.com/macros/s/.../exec",
    is_required: false,
    is_multiline: false,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Current endpoint
            Constraint::Length(4), // Draft
            Constraint::Min(0),    // Notes
        ])
        .margin(1)
        .split(inner);

    let (status, color) = if app.endpoint.is_configured() {
        ("configured", Color::Green)
    } else {
        ("not configured", Color::Red)
    };
    let label = Style::default().fg(Color::Gray);
    let current = vec![
        Line::from(vec![
            Span::styled("Status:   ", label),
            Span::styled(status, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Source:   ", label),
            Span::raw(app.endpoint.source().label()),
        ]),
        Line::from(vec![
            Span::styled("Endpoint: ", label),
            Span::raw(app.endpoint.as_str().to_string()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(current).wrap(Wrap { trim: false }),
        chunks[0],
    );

    draw_text_field(frame, chunks[1], &ENDPOINT_FIELD, &app.state.endpoint_draft, true);

    let notes = Paragraph::new(vec![
        Line::from("Enter saves the URL to the config file. Saving an empty URL removes it."),
        Line::from(format!(
            "At startup the {ENDPOINT_ENV_VAR} environment variable takes precedence over the saved URL."
        )),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    frame.render_widget(notes, chunks[2]);
}
