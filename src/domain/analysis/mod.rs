//! Analysis result - the three-section output of the external analysis service.

mod result;

pub use result::{section_or_default, AnalysisResult, Section, SectionKey};
