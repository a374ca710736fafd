//! Application state and core logic

use crate::config::{Endpoint, EndpointSource, TuiConfig};
use crate::platform::{QUIT_CONFIRM_WINDOW_MS, SHORTCUT_MODIFIER};
use crate::setup_guide::APPS_SCRIPT_SOURCE;
use crate::state::{
    AppState, FeedbackPayload, FieldFocus, FormAction, FormCommand, Score, SubmissionStatus,
    TextEdit, View,
};
use crate::submission::{SheetsClient, SubmissionClient, TransportError};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Result of one submission task
type SubmitOutcome = Result<(), TransportError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where feedback is posted
    pub endpoint: Endpoint,
    /// Client used by submission tasks
    client: Arc<dyn SubmissionClient>,
    config: TuiConfig,
    config_path: Option<PathBuf>,
    outcome_tx: mpsc::UnboundedSender<SubmitOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create the app with the HTTP client and the user's configuration
    pub fn new() -> Self {
        let (config, load_error) = match TuiConfig::load() {
            Ok(config) => (config, None),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load config, using defaults");
                (TuiConfig::default(), Some(format!("Failed to load config: {err}")))
            }
        };
        let endpoint = Endpoint::from_env(&config);
        tracing::info!(
            source = endpoint.source().label(),
            configured = endpoint.is_configured(),
            "Feedback endpoint resolved"
        );

        let mut app = Self::with_client(
            Arc::new(SheetsClient::new()),
            endpoint,
            config,
            TuiConfig::config_path(),
        );
        if let Some(message) = load_error {
            app.push_error(message);
        }
        app
    }

    /// Create the app around an arbitrary submission client
    pub fn with_client(
        client: Arc<dyn SubmissionClient>,
        endpoint: Endpoint,
        config: TuiConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            endpoint,
            client,
            config,
            config_path,
            outcome_tx,
            outcome_rx,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Run a form action through the state machine and carry out its command
    pub fn dispatch(&mut self, action: FormAction) {
        let current = std::mem::take(&mut self.state.feedback);
        let (next, command) = current.reduce(action);
        self.state.feedback = next;
        self.state.normalize_focus();

        if let Some(FormCommand::Submit(payload)) = command {
            self.spawn_submission(payload);
        }
    }

    /// Validate and, if valid, send the form
    pub fn submit(&mut self) {
        self.dispatch(FormAction::Submit {
            endpoint_configured: self.endpoint.is_configured(),
        });
        if let Some(err) = &self.state.feedback.error {
            tracing::debug!(error = %err, "Submission blocked");
        }
    }

    fn spawn_submission(&self, payload: FeedbackPayload) {
        tracing::info!(score = payload.score.value(), "Submitting feedback");
        let client = Arc::clone(&self.client);
        let endpoint = self.endpoint.as_str().to_string();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.submit(&endpoint, &payload).await;
            // Receiver only goes away when the app is shutting down
            let _ = tx.send(outcome);
        });
    }

    /// Apply any submission results that arrived since the last tick
    pub fn poll_submissions(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        match outcome {
            Ok(()) => {
                tracing::info!("Feedback submitted");
                self.dispatch(FormAction::SubmitSucceeded { at: Utc::now() });
                self.state.focus = FieldFocus::Score;
            }
            Err(err) => {
                tracing::debug!(error = %err, "Submission outcome applied as failure");
                self.dispatch(FormAction::SubmitFailed {
                    detail: err.to_string(),
                });
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return;
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        // Configuration errors block the form until acknowledged
        if self
            .state
            .feedback
            .error
            .as_ref()
            .is_some_and(|e| e.is_blocking())
        {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.dispatch(FormAction::DismissMessage),
                KeyCode::F(3) => {
                    self.dispatch(FormAction::DismissMessage);
                    self.navigate(View::Settings);
                }
                _ => {}
            }
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        match key.code {
            KeyCode::F(1) => return self.navigate(View::Form),
            KeyCode::F(2) => return self.navigate(View::Instructions),
            KeyCode::F(3) => return self.navigate(View::Settings),
            _ => {}
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Instructions => self.handle_instructions_key(key),
            View::Settings => self.handle_settings_key(key),
        }
    }

    /// Handle pasted text (bracketed paste)
    pub fn handle_paste(&mut self, text: &str) {
        match self.state.current_view {
            View::Settings => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.state.edit_endpoint_draft(TextEdit::Insert(c));
                }
            }
            View::Form => {
                let Some(field) = self.state.focus.text_field() else {
                    return;
                };
                for c in text.chars().filter(|c| *c != '\r') {
                    let edit = if c == '\n' {
                        TextEdit::Newline
                    } else {
                        TextEdit::Insert(c)
                    };
                    self.dispatch(FormAction::Edit { field, edit });
                }
            }
            View::Instructions => {}
        }
    }

    /// Navigate to a view
    pub fn navigate(&mut self, view: View) {
        if view == View::Settings && self.state.current_view != View::Settings {
            self.state.endpoint_draft = if self.endpoint.is_configured() {
                self.endpoint.as_str().to_string()
            } else {
                String::new()
            };
        }
        self.state.scroll_offset = 0;
        self.state.current_view = view;
    }

    fn handle_ctrl_c(&mut self) {
        let window = Duration::from_millis(QUIT_CONFIRM_WINDOW_MS);
        match self.last_ctrl_c {
            Some(last) if last.elapsed() < window => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(Instant::now());
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    fn is_submit_shortcut(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(SHORTCUT_MODIFIER))
    }

    /// Handle keys in the Form view
    fn handle_form_key(&mut self, key: KeyEvent) {
        if self.state.feedback.status == SubmissionStatus::Success {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                self.dispatch(FormAction::StartOver);
            }
            return;
        }

        if Self::is_submit_shortcut(&key) {
            self.submit();
            return;
        }

        match key.code {
            KeyCode::Tab => return self.state.next_field(),
            KeyCode::BackTab => return self.state.prev_field(),
            KeyCode::Esc => {
                self.dispatch(FormAction::DismissMessage);
                return;
            }
            _ => {}
        }

        match self.state.focus {
            FieldFocus::Score => self.handle_score_key(key),
            FieldFocus::Reason | FieldFocus::Feedback => self.handle_text_key(key),
            FieldFocus::SubmitButton => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit();
                }
            }
        }
    }

    fn handle_score_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => FormAction::NudgeScore(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => FormAction::NudgeScore(1),
            KeyCode::Home => FormAction::SetScore(Score::LOWEST),
            KeyCode::End => FormAction::SetScore(Score::HIGHEST),
            KeyCode::Delete | KeyCode::Backspace => FormAction::ClearScore,
            KeyCode::Char(c) => match c.to_digit(10).and_then(|d| Score::new(d as u8)) {
                Some(score) => FormAction::SetScore(score),
                None => return,
            },
            KeyCode::Enter => {
                if self.state.feedback.fields.score.is_none() {
                    FormAction::NudgeScore(0)
                } else {
                    return self.state.next_field();
                }
            }
            _ => return,
        };
        self.dispatch(action);
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let Some(field) = self.state.focus.text_field() else {
            return;
        };
        let edit = match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                TextEdit::Insert(c)
            }
            KeyCode::Enter => TextEdit::Newline,
            KeyCode::Backspace => TextEdit::Backspace,
            _ => return,
        };
        self.dispatch(FormAction::Edit { field, edit });
    }

    /// Handle keys in the Instructions view
    fn handle_instructions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Char('c') => match self.copy_to_clipboard(APPS_SCRIPT_SOURCE) {
                Ok(()) => {
                    self.status_message = Some("Script copied to clipboard".to_string());
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Clipboard unavailable");
                    self.push_error(format!("Could not copy to clipboard: {err}"));
                }
            },
            KeyCode::Esc => self.navigate(View::Form),
            _ => {}
        }
    }

    /// Handle keys in the Settings view
    fn handle_settings_key(&mut self, key: KeyEvent) {
        if Self::is_submit_shortcut(&key) {
            self.save_endpoint();
            return;
        }
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.edit_endpoint_draft(TextEdit::Insert(c));
            }
            KeyCode::Backspace => self.state.edit_endpoint_draft(TextEdit::Backspace),
            KeyCode::Delete => self.state.edit_endpoint_draft(TextEdit::Clear),
            KeyCode::Enter => self.save_endpoint(),
            KeyCode::Esc => self.navigate(View::Form),
            _ => {}
        }
    }

    /// Persist the endpoint draft and start using it
    fn save_endpoint(&mut self) {
        let draft = self.state.endpoint_draft.trim().to_string();
        let mut config = self.config.clone();
        config.endpoint_url = (!draft.is_empty()).then(|| draft.clone());

        if let Some(path) = &self.config_path {
            if let Err(err) = config.save_to(path) {
                tracing::warn!(error = %err, path = %path.display(), "Failed to save config");
                self.push_error(format!("Failed to save settings: {err}"));
                return;
            }
        }

        self.config = config;
        self.endpoint = if draft.is_empty() {
            Endpoint::placeholder()
        } else {
            Endpoint::new(draft, EndpointSource::ConfigFile)
        };
        tracing::info!(configured = self.endpoint.is_configured(), "Endpoint updated");
        self.status_message = Some(if self.endpoint.is_configured() {
            "Endpoint saved".to_string()
        } else {
            "Endpoint not configured; submissions are disabled".to_string()
        });
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
