//! AnalysisResult and its sections.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Title used for any section the analysis service did not produce.
pub const UNAVAILABLE_TITLE: &str = "Analysis Unavailable";

/// The three report sections, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    MindsetShift,
    OperationalFocus,
    NextMove,
}

impl SectionKey {
    /// All sections in the fixed report order.
    pub const ALL: [SectionKey; 3] = [
        SectionKey::MindsetShift,
        SectionKey::OperationalFocus,
        SectionKey::NextMove,
    ];

    /// Field name in the backend payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SectionKey::MindsetShift => "mindset_shift",
            SectionKey::OperationalFocus => "operational_focus",
            SectionKey::NextMove => "next_move",
        }
    }

    /// Lower-case human name, used in the placeholder description.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKey::MindsetShift => "mindset shift",
            SectionKey::OperationalFocus => "operational focus",
            SectionKey::NextMove => "next move",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One titled block of analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
}

impl Section {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// The fixed stand-in for a section the service did not produce.
    pub fn unavailable(key: SectionKey) -> Self {
        Self::new(
            UNAVAILABLE_TITLE,
            format!("Could not generate {}.", key.display_name()),
        )
    }
}

/// Output of the analysis service for one completed session.
///
/// Every section is optional on the wire. Missing or malformed sections
/// deserialize to `None` instead of failing the whole result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient_section", skip_serializing_if = "Option::is_none")]
    pub mindset_shift: Option<Section>,
    #[serde(default, deserialize_with = "lenient_section", skip_serializing_if = "Option::is_none")]
    pub operational_focus: Option<Section>,
    #[serde(default, deserialize_with = "lenient_section", skip_serializing_if = "Option::is_none")]
    pub next_move: Option<Section>,
}

impl AnalysisResult {
    pub fn new(mindset_shift: Section, operational_focus: Section, next_move: Section) -> Self {
        Self {
            mindset_shift: Some(mindset_shift),
            operational_focus: Some(operational_focus),
            next_move: Some(next_move),
        }
    }

    /// The section as delivered, if any.
    pub fn get(&self, key: SectionKey) -> Option<&Section> {
        match key {
            SectionKey::MindsetShift => self.mindset_shift.as_ref(),
            SectionKey::OperationalFocus => self.operational_focus.as_ref(),
            SectionKey::NextMove => self.next_move.as_ref(),
        }
    }

    /// Sections the service did not deliver.
    pub fn missing_sections(&self) -> Vec<SectionKey> {
        SectionKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_sections().is_empty()
    }
}

/// Total lookup: the delivered section, or the "unavailable" placeholder.
pub fn section_or_default(analysis: &AnalysisResult, key: SectionKey) -> Section {
    analysis
        .get(key)
        .cloned()
        .unwrap_or_else(|| Section::unavailable(key))
}

fn lenient_section<'de, D>(deserializer: D) -> Result<Option<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value::<Section>(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholder_for_operational_focus() {
        assert_eq!(
            Section::unavailable(SectionKey::OperationalFocus),
            Section::new("Analysis Unavailable", "Could not generate operational focus.")
        );
    }

    #[test]
    fn section_or_default_prefers_delivered_section() {
        let analysis = AnalysisResult {
            mindset_shift: Some(Section::new("Delegate", "Let go.")),
            ..Default::default()
        };
        assert_eq!(
            section_or_default(&analysis, SectionKey::MindsetShift).title,
            "Delegate"
        );
        assert_eq!(
            section_or_default(&analysis, SectionKey::NextMove),
            Section::unavailable(SectionKey::NextMove)
        );
    }

    #[test]
    fn deserializes_full_payload() {
        let analysis: AnalysisResult = serde_json::from_value(json!({
            "mindset_shift": {"title": "A", "description": "a"},
            "operational_focus": {"title": "B", "description": "b"},
            "next_move": {"title": "C", "description": "c"}
        }))
        .unwrap();
        assert!(analysis.is_complete());
    }

    #[test]
    fn missing_and_malformed_sections_become_none() {
        let analysis: AnalysisResult = serde_json::from_value(json!({
            "mindset_shift": {"title": "A"},
            "next_move": null
        }))
        .unwrap();
        assert_eq!(
            analysis.missing_sections(),
            vec![
                SectionKey::MindsetShift,
                SectionKey::OperationalFocus,
                SectionKey::NextMove
            ]
        );
    }

    #[test]
    fn legacy_flat_payload_yields_all_placeholders() {
        let analysis: AnalysisResult = serde_json::from_value(json!({
            "title": "From 'Doing It All' to 'Delegating with Trust'",
            "description": "You often feel like the bottleneck."
        }))
        .unwrap();
        assert_eq!(analysis, AnalysisResult::default());
    }
}
