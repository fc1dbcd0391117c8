//! Status enums for verisync.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Verification status of a piece of measurement equipment.
///
/// ```text
/// pending → active
///         → expired
/// active  → expired
///         → pending
/// expired → active   (manual only)
///         → pending  (manual only)
/// ```
///
/// Reconciliation may only perform the `→ expired` edge; everything else is an
/// owner action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    #[default]
    Pending,
    Expired,
}

impl EquipmentStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Active, Self::Expired],
            Self::Active => &[Self::Expired, Self::Pending],
            Self::Expired => &[Self::Active, Self::Pending],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the reconciliation engine may perform `self → next` without an
    /// owner action. Only expiry is automatic.
    #[must_use]
    pub fn can_auto_transition_to(self, next: Self) -> bool {
        next == Self::Expired && self.can_transition_to(next)
    }

    /// Whether the local record still claims the instrument is usable.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Active | Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckFreshness
// ---------------------------------------------------------------------------

/// Where a record sits in the recheck cycle.
///
/// ```text
/// never_checked → fresh → stale (≥ threshold) → eligible again
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckFreshness {
    NeverChecked,
    Fresh,
    Stale,
}

impl CheckFreshness {
    /// Whether a sweep should pick the record up.
    #[must_use]
    pub const fn is_due(self) -> bool {
        matches!(self, Self::NeverChecked | Self::Stale)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NeverChecked => "never_checked",
            Self::Fresh => "fresh",
            Self::Stale => "stale",
        }
    }
}

impl fmt::Display for CheckFreshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
