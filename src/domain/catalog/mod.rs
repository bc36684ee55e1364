//! Question catalog - the fixed, ordered diagnostic questionnaire.
//!
//! The catalog is immutable once built. Its order is the traversal order
//! of every diagnostic session.

mod builtin;
mod question;
mod question_catalog;

pub use question::{Question, QuestionKind};
pub use question_catalog::{CatalogError, QuestionCatalog};
