//! Entity structs for verisync domain objects.
//!
//! `EquipmentRecord` is the only persisted entity; the registry records exist
//! for the duration of a single reconciliation pass. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod equipment;
mod type_approval;
mod verification;

pub use equipment::EquipmentRecord;
pub use type_approval::TypeApprovalRecord;
pub use verification::ExternalVerificationRecord;

/// Join a reference base URL and a source id, tolerating a trailing slash.
pub(crate) fn join_reference(base: &str, id: &str) -> Option<String> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some(format!("{}/{id}", base.trim_end_matches('/')))
}
