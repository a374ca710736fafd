//! Form domain layer
//!
//! Field values, validation and the submission state machine, kept free of
//! any terminal or network code.

mod field;
mod form_state;

pub use field::{FieldFocus, Score, ScoreBand, TextEdit};
pub use form_state::{FeedbackPayload, FeedbackState, FormAction, FormCommand, SubmissionStatus};

#[cfg(test)]
pub use form_state::FormFields;
