//! Equipment store collaborator.
//!
//! The engine reads eligible records once per invocation and writes each
//! record back exactly once. [`MemoryStore`] evaluates filters in memory and
//! backs tests and the CLI's file store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use verisync_core::entities::EquipmentRecord;
use verisync_core::update::EquipmentUpdate;

use crate::error::StoreError;
use crate::schedule::EligibilityFilter;

#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// Records matching every rule of `filter`.
    async fn find_eligible(
        &self,
        filter: &EligibilityFilter,
    ) -> Result<Vec<EquipmentRecord>, StoreError>;

    /// Apply `update` to record `id` atomically.
    async fn update_equipment(&self, id: &str, update: &EquipmentUpdate)
    -> Result<(), StoreError>;
}

/// In-memory store keyed by equipment id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, EquipmentRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = EquipmentRecord>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().map(|r| (r.id.clone(), r)).collect()),
        }
    }

    /// Insert or replace a record.
    pub fn insert(&self, record: EquipmentRecord) {
        self.lock().insert(record.id.clone(), record);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<EquipmentRecord> {
        self.lock().get(id).cloned()
    }

    /// All records in id order.
    #[must_use]
    pub fn records(&self) -> Vec<EquipmentRecord> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, EquipmentRecord>> {
        // A poisoned map is still a consistent map: every write is a single insert.
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl EquipmentStore for MemoryStore {
    async fn find_eligible(
        &self,
        filter: &EligibilityFilter,
    ) -> Result<Vec<EquipmentRecord>, StoreError> {
        Ok(self
            .lock()
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn update_equipment(
        &self,
        id: &str,
        update: &EquipmentUpdate,
    ) -> Result<(), StoreError> {
        let mut records = self.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        update.apply_to(record)?;
        Ok(())
    }
}
