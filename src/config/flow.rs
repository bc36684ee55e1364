//! Question flow configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::FlowSettings;

/// Timing and catalog source for the diagnostic flow
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Length of an affirmation interlude in milliseconds
    #[serde(default = "default_affirmation_delay_ms")]
    pub affirmation_delay_ms: u64,

    /// Optional YAML/JSON catalog replacing the built-in questions
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl FlowConfig {
    pub fn affirmation_delay(&self) -> Duration {
        Duration::from_millis(self.affirmation_delay_ms)
    }

    pub fn settings(&self) -> FlowSettings {
        FlowSettings {
            affirmation_delay: self.affirmation_delay(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.affirmation_delay_ms == 0 || self.affirmation_delay_ms > 10_000 {
            return Err(ValidationError::InvalidAffirmationDelay);
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            affirmation_delay_ms: default_affirmation_delay_ms(),
            catalog_path: None,
        }
    }
}

fn default_affirmation_delay_ms() -> u64 {
    1500
}
