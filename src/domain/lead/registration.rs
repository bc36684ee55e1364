//! Lead registration payload.

use serde::{Deserialize, Serialize};

use super::CompanySizeBand;

/// What the lead capture step collects. Field-level validation of name and
/// email belongs to the capture form, not to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRegistration {
    pub name: String,
    pub email: String,
    #[serde(rename = "company_size")]
    pub company_size: CompanySizeBand,
}

impl LeadRegistration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company_size: CompanySizeBand,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_leads_request_body() {
        let lead = LeadRegistration::new("Ada", "ada@example.com", CompanySizeBand::From15To35);
        assert_eq!(
            serde_json::to_value(&lead).unwrap(),
            json!({"name": "Ada", "email": "ada@example.com", "company_size": "15-35"})
        );
    }
}
