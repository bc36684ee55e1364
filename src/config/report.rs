//! Report rendering configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::report::{layout::DEFAULT_LINE_WIDTH, ReportRenderer};

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Characters per wrapped body line
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

impl ReportConfig {
    pub fn renderer(&self) -> ReportRenderer {
        ReportRenderer::new(self.line_width)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(20..=200).contains(&self.line_width) {
            return Err(ValidationError::InvalidLineWidth);
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
        }
    }
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}
