//! Error taxonomy for the feedback form

use thiserror::Error;

/// Generic prompt shown for any failed submission; the real cause is only logged.
pub const RETRY_MESSAGE: &str = "Something went wrong sending your response. Please try again later.";

/// Missing or incomplete form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("score required")]
    ScoreRequired,
    #[error("reason required")]
    ReasonRequired,
}

impl ValidationError {
    /// Inline message shown under the form
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ScoreRequired => "Please select a score from 0 to 10.",
            Self::ReasonRequired => "Please tell us the reason for your score.",
        }
    }
}

/// Errors surfaced by the form state controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    /// The endpoint is blank or still the placeholder
    #[error("submission endpoint is not configured")]
    Configuration,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The submission failed; the detail is for diagnostics only
    #[error("submission failed: {0}")]
    Transport(String),
}

impl FeedbackError {
    /// Text the user gets to see. Transport details are never shown verbatim.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Configuration => {
                "The submission endpoint has not been configured yet. \
                 Open Settings (F3) and enter the Apps Script web app URL."
            }
            Self::Validation(err) => err.user_message(),
            Self::Transport(_) => RETRY_MESSAGE,
        }
    }

    /// Configuration errors block the form and render as a dialog
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_strings() {
        assert_eq!(ValidationError::ScoreRequired.to_string(), "score required");
        assert_eq!(ValidationError::ReasonRequired.to_string(), "reason required");
    }

    #[test]
    fn test_transport_detail_not_in_user_message() {
        let err = FeedbackError::Transport("Server responded with 500: boom".to_string());
        assert_eq!(err.user_message(), RETRY_MESSAGE);
        assert!(!err.user_message().contains("boom"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_only_configuration_is_blocking() {
        assert!(FeedbackError::Configuration.is_blocking());
        assert!(!FeedbackError::from(ValidationError::ScoreRequired).is_blocking());
        assert!(!FeedbackError::Transport(String::new()).is_blocking());
    }
}
