//! Reconciliation policy configuration.

use serde::{Deserialize, Serialize};

/// Minimum age of the last check before a sweep rechecks a record.
const fn default_recheck_after_days() -> u32 {
    7
}

/// Allowed drift between local and registry valid-until dates.
const fn default_mismatch_tolerance_days() -> u32 {
    3
}

/// Minimum change in valid-until that counts as a new verification.
const fn default_notify_dedup_hours() -> u32 {
    24
}

const fn default_batch_size() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReconcileConfig {
    #[serde(default = "default_recheck_after_days")]
    pub recheck_after_days: u32,

    #[serde(default = "default_mismatch_tolerance_days")]
    pub mismatch_tolerance_days: u32,

    #[serde(default = "default_notify_dedup_hours")]
    pub notify_dedup_hours: u32,

    /// Records per progress batch in a sweep.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            recheck_after_days: default_recheck_after_days(),
            mismatch_tolerance_days: default_mismatch_tolerance_days(),
            notify_dedup_hours: default_notify_dedup_hours(),
            batch_size: default_batch_size(),
        }
    }
}
