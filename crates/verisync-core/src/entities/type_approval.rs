use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An approved instrument type from the type-approval registry (MIT schema).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TypeApprovalRecord {
    pub registry_number: String,
    pub title: String,
    pub notation: String,
    pub source_record_id: String,
}

impl TypeApprovalRecord {
    #[must_use]
    pub fn reference_url(&self, base: &str) -> Option<String> {
        super::join_reference(base, &self.source_record_id)
    }
}
