//! Company size bands offered at lead capture.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Employee-count band, serialised exactly as the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySizeBand {
    #[serde(rename = "15-35")]
    From15To35,
    #[serde(rename = "36-60")]
    From36To60,
    #[serde(rename = "61-95")]
    From61To95,
    #[serde(rename = "96-200")]
    From96To200,
}

impl CompanySizeBand {
    /// All bands in ascending order.
    pub const ALL: [CompanySizeBand; 4] = [
        CompanySizeBand::From15To35,
        CompanySizeBand::From36To60,
        CompanySizeBand::From61To95,
        CompanySizeBand::From96To200,
    ];

    /// Wire value, e.g. `"15-35"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySizeBand::From15To35 => "15-35",
            CompanySizeBand::From36To60 => "36-60",
            CompanySizeBand::From61To95 => "61-95",
            CompanySizeBand::From96To200 => "96-200",
        }
    }
}

impl fmt::Display for CompanySizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanySizeBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('–', "-");
        Self::ALL
            .into_iter()
            .find(|band| band.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "company_size",
                    format!("expected one of 15-35, 36-60, 61-95, 96-200; got '{}'", s),
                )
            })
    }
}
