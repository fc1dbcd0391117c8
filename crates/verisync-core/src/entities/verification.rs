use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A verification event as reported by the registry (VRI schema), normalized.
///
/// Lives only for the duration of one reconciliation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExternalVerificationRecord {
    pub instrument_name: String,
    pub instrument_type: String,
    pub serial_number: String,
    pub type_registry_number: String,
    /// Title of the organization that performed the verification.
    pub organization: String,
    pub verification_date: Option<NaiveDate>,
    pub valid_until_date: Option<NaiveDate>,
    pub source_record_id: String,
}

impl ExternalVerificationRecord {
    /// Public link to this record under `base`, if the record has an id.
    #[must_use]
    pub fn reference_url(&self, base: &str) -> Option<String> {
        super::join_reference(base, &self.source_record_id)
    }

    /// Type registry number, ignoring blanks.
    #[must_use]
    pub fn type_registry(&self) -> Option<&str> {
        let number = self.type_registry_number.trim();
        (!number.is_empty()).then_some(number)
    }
}
