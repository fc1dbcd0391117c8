//! JSON-file equipment store.
//!
//! The whole file is a JSON array of equipment records. It is read once on
//! open; every update rewrites it through a temp file in the same directory
//! and a rename, so a crash never leaves a half-written store behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use verisync_core::entities::EquipmentRecord;
use verisync_core::update::EquipmentUpdate;
use verisync_reconcile::schedule::EligibilityFilter;
use verisync_reconcile::{EquipmentStore, MemoryStore, StoreError};

pub struct JsonFileStore {
    path: PathBuf,
    records: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the file exists but cannot be
    /// read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records: Vec<EquipmentRecord> = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Unavailable(format!("{} is not a valid store: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };

        tracing::debug!(path = %path.display(), records = records.len(), "equipment store opened");
        Ok(Self {
            path,
            records: MemoryStore::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, records: &[EquipmentRecord]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
impl JsonFileStore {
    fn records(&self) -> Vec<EquipmentRecord> {
        self.records.records()
    }
}

#[async_trait]
impl EquipmentStore for JsonFileStore {
    async fn find_eligible(
        &self,
        filter: &EligibilityFilter,
    ) -> Result<Vec<EquipmentRecord>, StoreError> {
        self.records.find_eligible(filter).await
    }

    async fn update_equipment(&self, id: &str, update: &EquipmentUpdate) -> Result<(), StoreError> {
        let mut snapshot = self.records.records();
        let record = snapshot
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        update.apply_to(record)?;
        let updated = record.clone();

        self.write_all(&snapshot)
            .map_err(|e| StoreError::WriteFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        self.records.insert(updated);
        Ok(())
    }
}
