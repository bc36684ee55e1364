//! Question value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-form text answer.
    Text,
    /// Exactly one of the question's options.
    #[serde(alias = "radio")]
    SingleChoice,
}

/// A single diagnostic question.
///
/// # Invariants
///
/// - `id` and `text` are non-empty
/// - `options` is non-empty iff `kind` is `SingleChoice`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affirmation: Option<String>,
}

impl Question {
    /// Creates a free-text question.
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::Text,
            options: Vec::new(),
            placeholder: None,
            affirmation: None,
        }
    }

    /// Creates a single-choice question over the given options.
    pub fn single_choice<I, S>(id: impl Into<String>, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::SingleChoice,
            options: options.into_iter().map(Into::into).collect(),
            placeholder: None,
            affirmation: None,
        }
    }

    /// Sets the input placeholder hint.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the micro-affirmation shown after the question is answered.
    pub fn with_affirmation(mut self, affirmation: impl Into<String>) -> Self {
        self.affirmation = Some(affirmation.into());
        self
    }

    /// Returns the affirmation, ignoring blank ones.
    pub fn affirmation(&self) -> Option<&str> {
        self.affirmation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Returns true if the answer would be a sensible value for this question.
    ///
    /// The flow itself only checks for emptiness; this is a hint for front ends
    /// that want to restrict single-choice input to the listed options.
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim();
        if answer.is_empty() {
            return false;
        }
        match self.kind {
            QuestionKind::Text => true,
            QuestionKind::SingleChoice => self.options.iter().any(|option| option == answer),
        }
    }

    /// Validates the question's structural invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::empty_field("question.id"));
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.text", self.id)));
        }
        match self.kind {
            QuestionKind::SingleChoice if self.options.is_empty() => {
                Err(ValidationError::invalid_format(
                    format!("{}.options", self.id),
                    "single choice questions need at least one option",
                ))
            }
            QuestionKind::Text if !self.options.is_empty() => Err(ValidationError::invalid_format(
                format!("{}.options", self.id),
                "text questions cannot define options",
            )),
            _ => Ok(()),
        }
    }
}
