//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CURSOR: &str = "▌";

/// Static description of a text field
pub struct FieldSpec<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub is_required: bool,
    pub is_multiline: bool,
}

/// Draw a labelled text field with cursor and placeholder.
///
/// Text is hard-wrapped to the field width and scrolled so the last row,
/// where the cursor sits, stays visible.
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &str,
    is_active: bool,
) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let cursor = Span::styled(if is_active { CURSOR } else { "" }, Style::default().fg(Color::Cyan));

    let mut title = vec![Span::raw(format!(" {}", spec.label))];
    if spec.is_required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    title.push(Span::raw(" "));

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);

    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(
            spec.placeholder,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        let text = if spec.is_multiline {
            value.to_string()
        } else {
            value.replace('\n', " ")
        };
        wrap_rows(&text, inner.width as usize, is_active)
            .into_iter()
            .map(Line::from)
            .collect()
    };

    if is_active {
        if value.is_empty() {
            lines[0].spans.insert(0, cursor);
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let scroll = (lines.len() as u16).saturating_sub(inner.height);
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll, 0)).block(block),
        area,
    );
}

/// Split `text` into rows of at most `width` characters.
///
/// With `reserve_cursor`, a trailing empty row is added when the last row is
/// full so the cursor has a cell to land in.
fn wrap_rows(text: &str, width: usize, reserve_cursor: bool) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }

    if reserve_cursor && rows.last().is_some_and(|r| r.chars().count() >= width) {
        rows.push(String::new());
    }
    rows
}
