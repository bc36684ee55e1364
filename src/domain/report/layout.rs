//! Fixed visual parameters of the clarity report.
//!
//! Units are millimetres on an A4 page, y measured downward from the top
//! edge. Font sizes are in points.

use serde::Serialize;

use crate::domain::analysis::SectionKey;

pub const REPORT_TITLE: &str = "Your Founder Clarity Report";
pub const REPORT_SUBTITLE: &str = "Personalized insights to help you move forward.";
pub const DISCLAIMER: &str =
    "Disclaimer: These insights are directional and intended for reflection.";

pub const TITLE_Y: f32 = 25.0;
pub const SUBTITLE_Y: f32 = 34.0;
pub const FIRST_SECTION_Y: f32 = 50.0;

/// Offset from a section's heading to its title.
pub const SECTION_TITLE_OFFSET: f32 = 7.0;
/// Offset from a section's heading to its first body line.
pub const SECTION_BODY_OFFSET: f32 = 15.0;
pub const LINE_HEIGHT: f32 = 6.0;
/// Space after the last body line of a section.
pub const SECTION_GAP: f32 = 10.0;

/// Distance of the disclaimer baseline from the bottom edge.
pub const DISCLAIMER_BOTTOM_OFFSET: f32 = 15.0;

pub const TITLE_FONT_SIZE: f32 = 22.0;
pub const SUBTITLE_FONT_SIZE: f32 = 12.0;
pub const HEADING_FONT_SIZE: f32 = 10.0;
pub const SECTION_TITLE_FONT_SIZE: f32 = 14.0;
pub const BODY_FONT_SIZE: f32 = 11.0;
pub const DISCLAIMER_FONT_SIZE: f32 = 9.0;

/// Default number of characters per wrapped body line.
pub const DEFAULT_LINE_WIDTH: usize = 90;

/// Page size and horizontal margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin_x: 20.0,
    };

    /// Baseline of the disclaimer line.
    pub fn disclaimer_y(&self) -> f32 {
        self.height - DISCLAIMER_BOTTOM_OFFSET
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Accent colour of a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Blue,
    Green,
    Amber,
}

impl ColorTag {
    /// sRGB components, 0-255.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorTag::Blue => (37, 99, 235),
            ColorTag::Green => (22, 163, 74),
            ColorTag::Amber => (217, 119, 6),
        }
    }
}

/// All-caps label and colour for each section.
pub fn section_style(key: SectionKey) -> (&'static str, ColorTag) {
    match key {
        SectionKey::MindsetShift => ("YOUR TOP MINDSET SHIFT", ColorTag::Blue),
        SectionKey::OperationalFocus => ("CRITICAL OPERATIONAL FOCUS", ColorTag::Green),
        SectionKey::NextMove => ("YOUR IMMEDIATE NEXT MOVE", ColorTag::Amber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn section_styles_are_distinct_and_upper_case() {
        let styles: Vec<_> = SectionKey::ALL.into_iter().map(section_style).collect();
        let colors: HashSet<_> = styles.iter().map(|(_, c)| *c).collect();
        assert_eq!(colors.len(), 3);
        for (label, _) in styles {
            assert_eq!(label, label.to_uppercase());
        }
    }

    #[test]
    fn disclaimer_sits_near_the_bottom() {
        assert_eq!(PageGeometry::A4.disclaimer_y(), 282.0);
    }
}
