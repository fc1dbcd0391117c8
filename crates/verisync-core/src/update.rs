//! Equipment update builder.
//!
//! An `EquipmentUpdate` is the single write a reconciliation pass makes for one
//! record. Absent fields are left untouched by the store; `Some(None)` clears a
//! nullable column.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::EquipmentRecord;
use crate::enums::EquipmentStatus;
use crate::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EquipmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_valid_until: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_external_check_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_notified_valid_until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch_flag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_approval_flag: Option<Option<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_approval_url: Option<Option<String>>,
}

impl EquipmentUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Names of the columns this update writes, in a stable order.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.status.is_some() {
            fields.push("status");
        }
        if self.verification_valid_until.is_some() {
            fields.push("verification_valid_until");
        }
        if self.last_external_check_at.is_some() {
            fields.push("last_external_check_at");
        }
        if self.last_notified_valid_until.is_some() {
            fields.push("last_notified_valid_until");
        }
        if self.mismatch_flag.is_some() {
            fields.push("mismatch_flag");
        }
        if self.external_reference_url.is_some() {
            fields.push("external_reference_url");
        }
        if self.type_approval_flag.is_some() {
            fields.push("type_approval_flag");
        }
        if self.type_approval_url.is_some() {
            fields.push("type_approval_url");
        }
        fields
    }

    /// Apply the update to an in-memory record.
    ///
    /// Updates only carry status changes the engine may make on its own, so a
    /// status other than the current one must be an automatic transition.
    /// Writing the current status again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] for any other status change.
    /// The record is left untouched.
    pub fn apply_to(&self, record: &mut EquipmentRecord) -> Result<(), CoreError> {
        if let Some(status) = self.status {
            if status != record.status && !record.status.can_auto_transition_to(status) {
                return Err(CoreError::InvalidTransition {
                    id: record.id.clone(),
                    from: record.status,
                    to: status,
                });
            }
            record.status = status;
        }
        if let Some(valid_until) = self.verification_valid_until {
            record.verification_valid_until = valid_until;
        }
        if let Some(checked_at) = self.last_external_check_at {
            record.last_external_check_at = Some(checked_at);
        }
        if let Some(notified) = self.last_notified_valid_until {
            record.last_notified_valid_until = Some(notified);
        }
        if let Some(mismatch) = self.mismatch_flag {
            record.mismatch_flag = mismatch;
        }
        if let Some(ref url) = self.external_reference_url {
            record.external_reference_url.clone_from(url);
        }
        if let Some(flag) = self.type_approval_flag {
            record.type_approval_flag = flag;
        }
        if let Some(ref url) = self.type_approval_url {
            record.type_approval_url.clone_from(url);
        }
        Ok(())
    }
}

pub struct EquipmentUpdateBuilder(EquipmentUpdate);

impl Default for EquipmentUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EquipmentUpdate::default())
    }

    #[must_use]
    pub const fn status(mut self, status: EquipmentStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn verification_valid_until(mut self, valid_until: Option<NaiveDate>) -> Self {
        self.0.verification_valid_until = Some(valid_until);
        self
    }

    #[must_use]
    pub const fn last_external_check_at(mut self, checked_at: DateTime<Utc>) -> Self {
        self.0.last_external_check_at = Some(checked_at);
        self
    }

    #[must_use]
    pub const fn last_notified_valid_until(mut self, valid_until: NaiveDate) -> Self {
        self.0.last_notified_valid_until = Some(valid_until);
        self
    }

    #[must_use]
    pub const fn mismatch_flag(mut self, mismatch: bool) -> Self {
        self.0.mismatch_flag = Some(mismatch);
        self
    }

    #[must_use]
    pub fn external_reference_url(mut self, url: Option<String>) -> Self {
        self.0.external_reference_url = Some(url);
        self
    }

    #[must_use]
    pub const fn type_approval_flag(mut self, flag: Option<bool>) -> Self {
        self.0.type_approval_flag = Some(flag);
        self
    }

    #[must_use]
    pub fn type_approval_url(mut self, url: Option<String>) -> Self {
        self.0.type_approval_url = Some(url);
        self
    }

    #[must_use]
    pub fn build(self) -> EquipmentUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_update_changes_nothing() {
        let update = EquipmentUpdateBuilder::new().build();
        assert!(update.is_empty());

        let mut record = EquipmentRecord::new("eq-1", "own-1");
        let before = record.clone();
        update.apply_to(&mut record).unwrap();
        assert_eq!(record, before);
    }

    #[test]
    fn apply_sets_and_clears_fields() {
        let mut record = EquipmentRecord::new("eq-1", "own-1");
        record.external_reference_url = Some("https://old".into());

        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let update = EquipmentUpdateBuilder::new()
            .status(EquipmentStatus::Expired)
            .verification_valid_until(Some(date))
            .mismatch_flag(true)
            .external_reference_url(None)
            .type_approval_flag(Some(false))
            .build();
        update.apply_to(&mut record).unwrap();

        assert_eq!(record.status, EquipmentStatus::Expired);
        assert_eq!(record.verification_valid_until, Some(date));
        assert!(record.mismatch_flag);
        assert!(record.external_reference_url.is_none());
        assert_eq!(record.type_approval_flag, Some(false));
    }

    #[test]
    fn reapplying_current_status_is_a_no_op() {
        let mut record = EquipmentRecord::new("eq-1", "own-1");
        record.status = EquipmentStatus::Expired;

        let update = EquipmentUpdateBuilder::new()
            .status(EquipmentStatus::Expired)
            .mismatch_flag(false)
            .build();
        update.apply_to(&mut record).unwrap();

        assert_eq!(record.status, EquipmentStatus::Expired);
        assert!(!record.mismatch_flag);
    }

    #[test]
    fn non_automatic_transition_leaves_record_untouched() {
        let mut record = EquipmentRecord::new("eq-1", "own-1");
        record.status = EquipmentStatus::Expired;
        record.mismatch_flag = true;
        let before = record.clone();

        let update = EquipmentUpdateBuilder::new()
            .status(EquipmentStatus::Active)
            .mismatch_flag(false)
            .build();
        let err = update.apply_to(&mut record).unwrap_err();

        assert_eq!(
            err,
            CoreError::InvalidTransition {
                id: "eq-1".into(),
                from: EquipmentStatus::Expired,
                to: EquipmentStatus::Active,
            }
        );
        assert_eq!(record, before);
    }

    #[test]
    fn serializes_only_present_fields() {
        let update = EquipmentUpdateBuilder::new().mismatch_flag(false).build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "mismatch_flag": false }));
        assert_eq!(update.changed_fields(), vec!["mismatch_flag"]);
    }
}
