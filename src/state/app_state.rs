//! Application state definitions

use super::forms::{FeedbackState, FieldFocus, TextEdit};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    Instructions,
    Settings,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Form => "Feedback",
            Self::Instructions => "Setup",
            Self::Settings => "Settings",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Feedback form
    pub feedback: FeedbackState,
    pub focus: FieldFocus,

    // Settings form
    pub endpoint_draft: String,

    // UI state
    pub scroll_offset: u16,
    /// Errors waiting to be shown in the dialog, oldest first
    pub error_queue: VecDeque<String>,
}

impl AppState {
    /// Move focus forward, skipping rows that are not on screen
    pub fn next_field(&mut self) {
        self.focus = self
            .focus
            .next(self.feedback.fields.is_reason_required());
    }

    /// Move focus backward, skipping rows that are not on screen
    pub fn prev_field(&mut self) {
        self.focus = self
            .focus
            .prev(self.feedback.fields.is_reason_required());
    }

    /// Pull focus off the reason field once it is hidden
    pub fn normalize_focus(&mut self) {
        if self.focus == FieldFocus::Reason && !self.feedback.fields.is_reason_required() {
            self.focus = FieldFocus::Feedback;
        }
    }

    pub fn edit_endpoint_draft(&mut self, edit: TextEdit) {
        if edit != TextEdit::Newline {
            edit.apply(&mut self.endpoint_draft);
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormAction, Score};

    #[test]
    fn test_default_view_is_form() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Form);
        assert_eq!(state.focus, FieldFocus::Score);
    }

    #[test]
    fn test_next_field_visits_reason_when_required() {
        let mut state = AppState::default();
        let (feedback, _) = state
            .feedback
            .clone()
            .reduce(FormAction::SetScore(Score::new(4).unwrap()));
        state.feedback = feedback;
        state.next_field();
        assert_eq!(state.focus, FieldFocus::Reason);
    }

    #[test]
    fn test_normalize_focus_leaves_hidden_reason() {
        let mut state = AppState::default();
        state.focus = FieldFocus::Reason;
        state.normalize_focus();
        assert_eq!(state.focus, FieldFocus::Feedback);
    }

    #[test]
    fn test_error_queue_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
        assert!(!state.has_errors());
    }

    #[test]
    fn test_endpoint_draft_is_single_line() {
        let mut state = AppState::default();
        state.edit_endpoint_draft(TextEdit::Insert('h'));
        state.edit_endpoint_draft(TextEdit::Newline);
        assert_eq!(state.endpoint_draft, "h");
    }

    #[test]
    fn test_scroll_saturates() {
        let mut state = AppState::default();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        state.scroll_down();
        assert_eq!(state.scroll_offset, 1);
    }
}
