//! Response types returned by the reconciliation entry points.
//!
//! These are also the JSON shapes printed by `vsync reconcile` and
//! `vsync sweep`.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which entry point produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    Targeted,
    Sweep,
}

impl ReconcileMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Targeted => "targeted",
            Self::Sweep => "sweep",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of reconciling one record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordOutcome {
    pub id: String,
    pub mismatch: bool,
    pub new_valid_until: Option<NaiveDate>,
    pub reference_url: Option<String>,
    pub notified: bool,
}

/// Response from `reconcile` / `reconcile_sweep`.
///
/// Partial success is normal: `failed` counts records whose pass was skipped
/// and will be retried on the next run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReconciliationSummary {
    pub mode: ReconcileMode,
    pub checked: u32,
    pub failed: u32,
    /// Targeted ids that were not found or carry no identifier.
    pub skipped: u32,
    pub results: Vec<RecordOutcome>,
    pub notifications: u32,
}

impl ReconciliationSummary {
    #[must_use]
    pub const fn empty(mode: ReconcileMode) -> Self {
        Self {
            mode,
            checked: 0,
            failed: 0,
            skipped: 0,
            results: Vec::new(),
            notifications: 0,
        }
    }

    /// Number of checked records currently flagged as mismatched.
    #[must_use]
    pub fn mismatches(&self) -> usize {
        self.results.iter().filter(|r| r.mismatch).count()
    }
}
