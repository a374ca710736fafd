//! UI module for rendering the TUI

mod components;
mod field_renderer;
mod form;
mod instructions;
mod layout;
mod settings;

use crate::app::App;
use crate::state::View;
use components::{render_configuration_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, content_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Form => form::draw(frame, content_area, app),
        View::Instructions => instructions::draw(frame, content_area, app),
        View::Settings => settings::draw(frame, content_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Overlays, drawn last so they sit on top
    if let Some(err) = app
        .state
        .feedback
        .error
        .as_ref()
        .filter(|e| e.is_blocking())
    {
        render_configuration_dialog(frame, err.user_message());
    }

    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, "Error", message);
    }
}
