//! Owner notification gate and the notifier collaborator.
//!
//! The gate decides; delivery belongs to [`OwnerNotifier`]. The dedup key
//! (`last_notified_valid_until`) travels in the same store write as the rest of
//! the reconciliation result, so a retried pass cannot notify twice.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use verisync_core::entities::EquipmentRecord;
use verisync_core::notification::{NotificationBatch, NotificationEvent};

use crate::error::NotifyError;

/// Delivery side of owner notifications.
///
/// Called once per owner per invocation. Failures are logged by the engine
/// and not retried in-line.
#[async_trait]
pub trait OwnerNotifier: Send + Sync {
    async fn notify_owner(&self, batch: &NotificationBatch) -> Result<(), NotifyError>;
}

/// Whether a newly observed valid-until date is a new verification event.
///
/// Fires only for dates after `today`, and only when nothing was notified yet
/// or the date moved forward by more than `dedup_window` since the last
/// notification.
#[must_use]
pub fn should_notify(
    new_valid_until: NaiveDate,
    last_notified: Option<NaiveDate>,
    today: NaiveDate,
    dedup_window: Duration,
) -> bool {
    if new_valid_until <= today {
        return false;
    }
    match last_notified {
        None => true,
        Some(last) => new_valid_until - last > dedup_window,
    }
}

/// Build the event for `record` at `valid_until`.
#[must_use]
pub fn event_for(
    record: &EquipmentRecord,
    valid_until: NaiveDate,
    reference_url: Option<String>,
) -> NotificationEvent {
    NotificationEvent {
        equipment_id: record.id.clone(),
        owner_id: record.owner_id.clone(),
        owner_contact: record.owner_contact.clone(),
        equipment_name: record.name.clone(),
        serial_number: record.serial().map(String::from),
        valid_until,
        reference_url,
    }
}

/// Group events into one batch per owner, owners in first-seen order.
///
/// The first non-empty contact seen for an owner is used for the batch.
#[must_use]
pub fn group_by_owner(events: Vec<NotificationEvent>) -> Vec<NotificationBatch> {
    let mut batches: Vec<NotificationBatch> = Vec::new();
    for event in events {
        if let Some(batch) = batches.iter_mut().find(|b| b.owner_id == event.owner_id) {
            if batch.owner_contact.is_none() {
                batch.owner_contact.clone_from(&event.owner_contact);
            }
            batch.items.push(event);
        } else {
            batches.push(NotificationBatch {
                owner_id: event.owner_id.clone(),
                owner_contact: event.owner_contact.clone(),
                items: vec![event],
            });
        }
    }
    batches
}
