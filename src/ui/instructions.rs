//! Setup instructions view

use super::components::wrap_text;
use crate::app::App;
use crate::setup_guide::{APPS_SCRIPT_SOURCE, SETUP_STEPS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Setup: Google Sheets ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    let lines = build_lines(inner.width.saturating_sub(2) as usize);
    let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
    let scroll = app.state.scroll_offset.min(max_scroll);

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Numbered steps followed by the script, pre-wrapped to `width`
fn build_lines(width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];

    for (i, step) in SETUP_STEPS.iter().enumerate() {
        let prefix = format!(" {:>2}. ", i + 1);
        let indent = " ".repeat(prefix.len());
        let wrapped = wrap_text(step, width.saturating_sub(prefix.len()).max(1));
        for (j, part) in wrapped.into_iter().enumerate() {
            let lead = if j == 0 {
                Span::styled(prefix.clone(), Style::default().fg(Color::Yellow))
            } else {
                Span::raw(indent.clone())
            };
            lines.push(Line::from(vec![lead, Span::raw(part)]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Apps Script code:",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for code in APPS_SCRIPT_SOURCE.lines() {
        lines.push(Line::from(Span::styled(
            format!("   {code}"),
            Style::default().fg(Color::Green),
        )));
    }

    lines
}
