//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, title: &str, error_message: &str) {
    let hint = vec![
        Span::raw("Press "),
        key_span("Enter"),
        Span::raw(" or "),
        key_span("Esc"),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            color: Color::Red,
            message: error_message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}

/// Dialog shown when the form cannot be sent because no endpoint is set
pub fn render_configuration_dialog(frame: &mut Frame, message: &str) {
    let hint = vec![
        key_span("F3"),
        Span::raw(" settings   "),
        key_span("Enter"),
        Span::raw(" dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Not configured",
            color: Color::Yellow,
            message,
            hint: Some(hint),
            max_width: 64,
        },
    );
}
