//! Feedback form and success panel

use super::components::{render_button, BUTTON_HEIGHT};
use super::field_renderer::{draw_text_field, FieldSpec};
use crate::app::App;
use crate::state::{FieldFocus, Score, ScoreBand, SubmissionStatus};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SCORE_QUESTION: &str = "From 0 to 10, how likely are you to recommend this experience?";

const REASON_FIELD: FieldSpec<'static> = FieldSpec {
    label: "Why not a 10?",
    placeholder: "Your opinion helps us improve...",
    is_required: true,
    is_multiline: true,
};

const FEEDBACK_FIELD: FieldSpec<'static> = FieldSpec {
    label: "Impressions, perceptions and experiences (optional)",
    placeholder: "What did you see, feel or learn with the children?",
    is_required: false,
    is_multiline: true,
};

/// Colour for a score band
pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Unset => Color::Gray,
        ScoreBand::Detractor => Color::Red,
        ScoreBand::Passive => Color::Yellow,
        ScoreBand::Promoter => Color::Green,
    }
}

/// Draw the form or, after a successful submission, the thank-you panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.feedback.status == SubmissionStatus::Success {
        draw_success(frame, area, app);
    } else {
        draw_form(frame, area, app);
    }
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let fields = &app.state.feedback.fields;
    let reason_visible = fields.is_reason_required();

    let block = Block::default()
        .title(" Experience Survey ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(5)]; // Score
    if reason_visible {
        constraints.push(Constraint::Min(4)); // Reason
    }
    constraints.extend([
        Constraint::Min(4),                // Feedback
        Constraint::Length(1),             // Message
        Constraint::Length(BUTTON_HEIGHT), // Submit
    ]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let mut row = 0;
    draw_score(frame, chunks[row], fields.score, app.state.focus == FieldFocus::Score);
    row += 1;

    if reason_visible {
        draw_text_field(
            frame,
            chunks[row],
            &REASON_FIELD,
            &fields.reason,
            app.state.focus == FieldFocus::Reason,
        );
        row += 1;
    }

    draw_text_field(
        frame,
        chunks[row],
        &FEEDBACK_FIELD,
        &fields.feedback,
        app.state.focus == FieldFocus::Feedback,
    );
    row += 1;

    // Inline message; blocking errors are drawn as a dialog instead
    if let Some(err) = app
        .state
        .feedback
        .error
        .as_ref()
        .filter(|e| !e.is_blocking())
    {
        let message = Paragraph::new(err.user_message())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(message, chunks[row]);
    }
    row += 1;

    let submitting = app.state.feedback.is_submitting();
    let label = if submitting { "Sending..." } else { "Submit" };
    render_button(
        frame,
        centered(chunks[row], 24),
        label,
        app.state.focus == FieldFocus::SubmitButton,
        !submitting,
        Color::LightRed,
    );
}

/// Draw the 0..10 slider with the selected value highlighted
fn draw_score(frame: &mut Frame, area: Rect, score: Option<Score>, is_active: bool) {
    let band = ScoreBand::of(score);
    let color = band_color(band);
    let selected = score.map(Score::value);

    let value_line = Line::from(vec![
        Span::styled(
            format!(" {} ", score.map_or("-".to_string(), |s| s.to_string())),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(band.label(), Style::default().fg(color)),
    ]);

    let mut scale = Vec::new();
    for value in Score::MIN..=Score::MAX {
        let style = if Some(value) == selected {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        scale.push(Span::styled(format!(" {value} "), style));
    }

    let border = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" {SCORE_QUESTION} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let paragraph = Paragraph::new(vec![value_line, Line::from(""), Line::from(scale)])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_success(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Experience Survey ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines = vec![
        Line::from(Span::styled(
            "Thank you!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Your response was sent successfully."),
    ];
    if let Some(at) = app.state.feedback.last_submitted_at {
        lines.push(Line::from(Span::styled(
            format!("Sent at {}", at.with_timezone(&Local).format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );

    render_button(
        frame,
        centered(chunks[2], 30),
        "Submit another response",
        true,
        true,
        Color::Yellow,
    );
}

/// Horizontally centre a rect of `width` inside `area`
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
