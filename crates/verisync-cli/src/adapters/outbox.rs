//! JSONL notification outbox.
//!
//! Each owner batch becomes one line in the outbox file. Delivery to the
//! owner (mail, messenger) is a separate consumer of that file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use verisync_core::notification::NotificationBatch;
use verisync_reconcile::{NotifyError, OwnerNotifier};

/// One outbox line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub queued_at: DateTime<Utc>,
    #[serde(flatten)]
    pub batch: NotificationBatch,
}

pub struct JsonlOutbox {
    path: PathBuf,
}

impl JsonlOutbox {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
impl JsonlOutbox {
    fn entries(&self) -> std::io::Result<Vec<OutboxEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&self.path)?.collect()
    }
}

#[async_trait]
impl OwnerNotifier for JsonlOutbox {
    async fn notify_owner(&self, batch: &NotificationBatch) -> Result<(), NotifyError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| NotifyError::Delivery(e.to_string()))?;
        }

        let entry = OutboxEntry {
            queued_at: Utc::now(),
            batch: batch.clone(),
        };
        serde_jsonlines::append_json_lines(&self.path, [&entry])
            .map_err(|e| NotifyError::Delivery(format!("{}: {e}", self.path.display())))?;

        tracing::debug!(owner_id = %batch.owner_id, items = batch.len(), "notification batch queued");
        Ok(())
    }
}
