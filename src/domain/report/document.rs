//! ReportDocument - the laid-out report, ready for export.

use serde::Serialize;

use super::layout::{ColorTag, PageGeometry, LINE_HEIGHT, SECTION_BODY_OFFSET, SECTION_TITLE_OFFSET};
use crate::domain::analysis::SectionKey;

/// A single line of text at a fixed vertical position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedText {
    pub text: String,
    pub y: f32,
}

/// One analysis section after layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub key: SectionKey,
    /// All-caps label drawn above the title.
    pub heading: &'static str,
    pub color: ColorTag,
    pub title: String,
    /// Unwrapped description, as delivered or substituted.
    pub description: String,
    /// Wrapped description lines.
    pub lines: Vec<String>,
    /// Baseline of the heading label.
    pub offset: f32,
    /// Vertical space consumed, including the trailing gap.
    pub height: f32,
}

impl RenderedSection {
    pub fn title_y(&self) -> f32 {
        self.offset + SECTION_TITLE_OFFSET
    }

    /// Baseline of the `index`-th wrapped line.
    pub fn line_y(&self, index: usize) -> f32 {
        self.offset + SECTION_BODY_OFFSET + index as f32 * LINE_HEIGHT
    }
}

/// The fully laid-out report: title block, three sections, disclaimer.
///
/// Stateless and never persisted; re-render from the analysis when needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub page: PageGeometry,
    pub title: PlacedText,
    pub subtitle: PlacedText,
    pub sections: Vec<RenderedSection>,
    pub disclaimer: PlacedText,
    /// Vertical cursor after the last section.
    pub content_bottom: f32,
}

impl ReportDocument {
    pub fn section(&self, key: SectionKey) -> Option<&RenderedSection> {
        self.sections.iter().find(|section| section.key == key)
    }

    /// True when section content runs into the disclaimer line. Content is
    /// never moved to a second page.
    pub fn overflows(&self) -> bool {
        self.content_bottom > self.disclaimer.y - LINE_HEIGHT
    }

    /// Plain-text rendering, used by terminal front ends.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title.text);
        out.push('\n');
        out.push_str(&self.subtitle.text);
        out.push_str("\n\n");
        for section in &self.sections {
            out.push_str(section.heading);
            out.push('\n');
            out.push_str(&section.title);
            out.push('\n');
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(&self.disclaimer.text);
        out.push('\n');
        out
    }
}
