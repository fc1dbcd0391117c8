//! Cross-cutting error types for verisync.
//!
//! Domain-specific errors (`RegistryError`, `ReconcileError`, ...) live in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

use crate::enums::EquipmentStatus;

/// Errors raised while applying domain rules to a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: equipment {id} from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: EquipmentStatus,
        to: EquipmentStatus,
    },
}
