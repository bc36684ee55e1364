//! ReportRenderer - AnalysisResult to ReportDocument.

use super::document::{PlacedText, RenderedSection, ReportDocument};
use super::layout::{
    section_style, PageGeometry, DEFAULT_LINE_WIDTH, DISCLAIMER, FIRST_SECTION_Y, LINE_HEIGHT,
    REPORT_SUBTITLE, REPORT_TITLE, SECTION_BODY_OFFSET, SECTION_GAP, SUBTITLE_Y, TITLE_Y,
};
use super::wrap::wrap_words;
use crate::domain::analysis::{section_or_default, AnalysisResult, SectionKey};

/// Lays out an analysis as a one-page report.
///
/// Rendering cannot fail: sections the analysis lacks are replaced by the
/// "Analysis Unavailable" placeholder. The same input always produces the
/// same document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRenderer {
    line_width: usize,
    page: PageGeometry,
}

impl ReportRenderer {
    /// Creates a renderer wrapping body text at `line_width` characters.
    pub fn new(line_width: usize) -> Self {
        Self {
            line_width: line_width.max(1),
            page: PageGeometry::A4,
        }
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn render(&self, analysis: &AnalysisResult) -> ReportDocument {
        let mut cursor = FIRST_SECTION_Y;
        let mut sections = Vec::with_capacity(SectionKey::ALL.len());

        for key in SectionKey::ALL {
            let section = self.render_section(analysis, key, cursor);
            cursor += section.height;
            sections.push(section);
        }

        let document = ReportDocument {
            page: self.page,
            title: PlacedText {
                text: REPORT_TITLE.to_string(),
                y: TITLE_Y,
            },
            subtitle: PlacedText {
                text: REPORT_SUBTITLE.to_string(),
                y: SUBTITLE_Y,
            },
            sections,
            disclaimer: PlacedText {
                text: DISCLAIMER.to_string(),
                y: self.page.disclaimer_y(),
            },
            content_bottom: cursor,
        };

        if document.overflows() {
            tracing::warn!(
                content_bottom = document.content_bottom,
                disclaimer_y = document.disclaimer.y,
                "report content overflows the page"
            );
        }

        document
    }

    fn render_section(&self, analysis: &AnalysisResult, key: SectionKey, offset: f32) -> RenderedSection {
        let (heading, color) = section_style(key);
        let section = section_or_default(analysis, key);
        let lines = wrap_words(&section.description, self.line_width);
        let height = SECTION_BODY_OFFSET + lines.len() as f32 * LINE_HEIGHT + SECTION_GAP;

        RenderedSection {
            key,
            heading,
            color,
            title: section.title,
            description: section.description,
            lines,
            offset,
            height,
        }
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_WIDTH)
    }
}
