//! Feedback form state and its transition function

use super::field::{is_reason_required, Score, TextEdit, TextField};
use crate::error::{FeedbackError, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Values entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    pub score: Option<Score>,
    pub reason: String,
    pub feedback: String,
}

impl FormFields {
    pub fn is_reason_required(&self) -> bool {
        is_reason_required(self.score)
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Reason => &mut self.reason,
            TextField::Feedback => &mut self.feedback,
        }
    }
}

/// JSON body posted to the spreadsheet endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackPayload {
    pub score: Score,
    pub reason: String,
    pub feedback: String,
}

/// Inputs to the form state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetScore(Score),
    ClearScore,
    /// Move the slider one or more steps
    NudgeScore(i8),
    Edit { field: TextField, edit: TextEdit },
    Submit { endpoint_configured: bool },
    SubmitSucceeded { at: DateTime<Utc> },
    SubmitFailed { detail: String },
    /// Close the message currently shown; the status is left alone
    DismissMessage,
    /// "Submit another response" from the success panel
    StartOver,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Submit(FeedbackPayload),
}

/// Complete state of the feedback form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackState {
    pub fields: FormFields,
    pub status: SubmissionStatus,
    /// Message currently surfaced to the user
    pub error: Option<FeedbackError>,
    pub last_submitted_at: Option<DateTime<Utc>>,
}

impl FeedbackState {
    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Fields can only change while the form is on screen and not in flight
    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Idle | SubmissionStatus::Error
        )
    }

    /// Check the submission rules in order, stopping at the first failure
    pub fn validate(&self, endpoint_configured: bool) -> Result<FeedbackPayload, FeedbackError> {
        if !endpoint_configured {
            return Err(FeedbackError::Configuration);
        }
        let score = self.fields.score.ok_or(ValidationError::ScoreRequired)?;
        let reason_required = is_reason_required(Some(score));
        if reason_required && self.fields.reason.trim().is_empty() {
            return Err(ValidationError::ReasonRequired.into());
        }
        Ok(FeedbackPayload {
            score,
            reason: if reason_required {
                self.fields.reason.clone()
            } else {
                String::new()
            },
            feedback: self.fields.feedback.clone(),
        })
    }

    /// Apply an action, returning the next state and any command to run.
    pub fn reduce(mut self, action: FormAction) -> (Self, Option<FormCommand>) {
        match action {
            FormAction::SetScore(score) if self.is_editable() => {
                self.fields.score = Some(score);
            }
            FormAction::ClearScore if self.is_editable() => {
                self.fields.score = None;
            }
            FormAction::NudgeScore(delta) if self.is_editable() => {
                self.fields.score = Some(Score::nudge(self.fields.score, delta));
            }
            FormAction::Edit { field, edit } if self.is_editable() => {
                edit.apply(self.fields.text_mut(field));
            }
            FormAction::Submit { endpoint_configured } if self.is_editable() => {
                match self.validate(endpoint_configured) {
                    Ok(payload) => {
                        self.error = None;
                        self.status = SubmissionStatus::Submitting;
                        return (self, Some(FormCommand::Submit(payload)));
                    }
                    Err(FeedbackError::Configuration) => {
                        self.error = Some(FeedbackError::Configuration);
                        self.status = SubmissionStatus::Error;
                    }
                    Err(err) => {
                        self.error = Some(err);
                    }
                }
            }
            FormAction::SubmitSucceeded { at } if self.is_submitting() => {
                self.fields = FormFields::default();
                self.error = None;
                self.status = SubmissionStatus::Success;
                self.last_submitted_at = Some(at);
            }
            FormAction::SubmitFailed { detail } if self.is_submitting() => {
                self.error = Some(FeedbackError::Transport(detail));
                self.status = SubmissionStatus::Error;
            }
            FormAction::DismissMessage => {
                self.error = None;
            }
            FormAction::StartOver if self.status == SubmissionStatus::Success => {
                self.status = SubmissionStatus::Idle;
            }
            _ => {}
        }
        (self, None)
    }
}
