//! QuestionCatalog - ordered, validated question sequence.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::{builtin, Question};
use crate::domain::foundation::ValidationError;

/// Errors raised while building a catalog from external data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse question catalog: {0}")]
    Parse(String),

    #[error("Invalid question catalog: {0}")]
    Invalid(#[from] ValidationError),
}

/// Immutable ordered sequence of questions.
///
/// # Invariants
///
/// - at least one question
/// - question ids are unique
/// - every question passes [`Question::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, validating every question and id uniqueness.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id.as_str()) {
                return Err(ValidationError::duplicate("question.id", question.id.clone()));
            }
        }

        Ok(Self { questions })
    }

    /// The built-in twelve question founder diagnostic.
    pub fn founder_diagnostic() -> Self {
        Self {
            questions: builtin::founder_diagnostic(),
        }
    }

    /// Parses a catalog from YAML (or JSON) of the form `questions: [...]`.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_yaml::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self::new(file.questions)?)
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the final question.
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    /// Returns the question at `index`.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns the position of the question with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Returns true if a question with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Question ids in traversal order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.id.as_str())
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    /// Iterates questions in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::founder_diagnostic()
    }
}
