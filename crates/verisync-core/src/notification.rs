//! Owner notification events.
//!
//! The engine's responsibility ends at deciding to notify; delivery belongs to
//! the notifier collaborator, which receives one batch per owner.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A newly observed verification worth telling the owner about.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NotificationEvent {
    pub equipment_id: String,
    pub owner_id: String,
    pub owner_contact: Option<String>,
    pub equipment_name: String,
    pub serial_number: Option<String>,
    pub valid_until: NaiveDate,
    pub reference_url: Option<String>,
}

/// All events for one owner produced by a single invocation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NotificationBatch {
    pub owner_id: String,
    pub owner_contact: Option<String>,
    pub items: Vec<NotificationEvent>,
}

impl NotificationBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
