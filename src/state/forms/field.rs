//! Form field value objects

use serde::Serialize;

/// Net Promoter Score in the range 0..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;
    /// Where the slider rests before anything is chosen
    pub const RESTING: u8 = 5;
    pub const LOWEST: Score = Score(Self::MIN);
    pub const HIGHEST: Score = Score(Self::MAX);

    /// Create a score, rejecting values above 10
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Move the slider by `delta` steps, clamped to the valid range.
    /// An unset slider starts from the resting position.
    pub fn nudge(current: Option<Self>, delta: i8) -> Self {
        let base = current.map_or(Self::RESTING, Self::value) as i16;
        let next = (base + delta as i16).clamp(Self::MIN as i16, Self::MAX as i16);
        Self(next as u8)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NPS category a score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Unset,
    Detractor,
    Passive,
    Promoter,
}

impl ScoreBand {
    pub fn of(score: Option<Score>) -> Self {
        match score.map(Score::value) {
            None => Self::Unset,
            Some(0..=6) => Self::Detractor,
            Some(7..=8) => Self::Passive,
            Some(_) => Self::Promoter,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unset => "Not rated",
            Self::Detractor => "Detractor",
            Self::Passive => "Passive",
            Self::Promoter => "Promoter",
        }
    }
}

/// Whether the explanation field must be filled in
pub fn is_reason_required(score: Option<Score>) -> bool {
    score.is_some_and(|s| s.value() < Score::MAX)
}

/// Free-text fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Reason,
    Feedback,
}

/// A single edit applied to a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Newline,
    Backspace,
    Clear,
}

impl TextEdit {
    pub fn apply(self, value: &mut String) {
        match self {
            TextEdit::Insert(c) => value.push(c),
            TextEdit::Newline => value.push('\n'),
            TextEdit::Backspace => {
                value.pop();
            }
            TextEdit::Clear => value.clear(),
        }
    }
}

/// Focusable rows of the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldFocus {
    #[default]
    Score,
    Reason,
    Feedback,
    SubmitButton,
}

impl FieldFocus {
    /// Next focus target, skipping the reason field while it is hidden
    pub fn next(self, reason_visible: bool) -> Self {
        match self {
            Self::Score if reason_visible => Self::Reason,
            Self::Score | Self::Reason => Self::Feedback,
            Self::Feedback => Self::SubmitButton,
            Self::SubmitButton => Self::Score,
        }
    }

    /// Previous focus target, skipping the reason field while it is hidden
    pub fn prev(self, reason_visible: bool) -> Self {
        match self {
            Self::Score => Self::SubmitButton,
            Self::Reason => Self::Score,
            Self::Feedback if reason_visible => Self::Reason,
            Self::Feedback => Self::Score,
            Self::SubmitButton => Self::Feedback,
        }
    }

    /// The text field behind this focus, if any
    pub fn text_field(self) -> Option<TextField> {
        match self {
            Self::Reason => Some(TextField::Reason),
            Self::Feedback => Some(TextField::Feedback),
            Self::Score | Self::SubmitButton => None,
        }
    }
}
