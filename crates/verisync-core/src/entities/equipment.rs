use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EquipmentStatus;

/// A measuring instrument owned by a customer, as believed locally.
///
/// Created and edited by inventory management; reconciliation only touches the
/// verification fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EquipmentRecord {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub owner_contact: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub registry_number: Option<String>,
    #[serde(default)]
    pub status: EquipmentStatus,
    #[serde(default)]
    pub verification_valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub last_external_check_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_notified_valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub mismatch_flag: bool,
    #[serde(default)]
    pub external_reference_url: Option<String>,
    #[serde(default)]
    pub type_approval_flag: Option<bool>,
    #[serde(default)]
    pub type_approval_url: Option<String>,
}

impl EquipmentRecord {
    /// A fresh, never-checked record with no identifiers.
    #[must_use]
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            owner_contact: None,
            name: String::new(),
            serial_number: None,
            registry_number: None,
            status: EquipmentStatus::Pending,
            verification_valid_until: None,
            last_external_check_at: None,
            last_notified_valid_until: None,
            mismatch_flag: false,
            external_reference_url: None,
            type_approval_flag: None,
            type_approval_url: None,
        }
    }

    /// Serial number, ignoring blank values.
    #[must_use]
    pub fn serial(&self) -> Option<&str> {
        non_blank(self.serial_number.as_deref())
    }

    /// Type registry number, ignoring blank values.
    #[must_use]
    pub fn registry(&self) -> Option<&str> {
        non_blank(self.registry_number.as_deref())
    }

    /// Whether the record carries anything the registry can be searched by.
    #[must_use]
    pub fn has_identifier(&self) -> bool {
        self.serial().is_some() || self.registry().is_some()
    }

    /// Term used for the verification search: serial first, registry number
    /// otherwise.
    #[must_use]
    pub fn query_term(&self) -> Option<&str> {
        self.serial().or_else(|| self.registry())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
