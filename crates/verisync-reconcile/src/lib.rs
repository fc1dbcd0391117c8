//! # verisync-reconcile
//!
//! Reconciles local equipment records against the metrology registry.
//!
//! The [`engine::ReconcileEngine`] drives two entry points:
//! - targeted: explicit ids, checked regardless of when they were last checked
//! - sweep: every identifiable record not checked within the recheck window
//!
//! Decision logic lives in pure functions ([`reconciler::reconcile_record`],
//! [`notify::should_notify`]); the engine wires them to three collaborators:
//! an [`store::EquipmentStore`], an [`notify::OwnerNotifier`] and a
//! [`source::VerificationSource`].

pub mod engine;
pub mod notify;
pub mod policy;
pub mod reconciler;
pub mod schedule;
pub mod source;
pub mod store;

mod error;

pub use engine::{OrgIndex, ReconcileEngine};
pub use error::{NotifyError, ReconcileError, StoreError};
pub use notify::OwnerNotifier;
pub use policy::ReconcilePolicy;
pub use source::VerificationSource;
pub use store::{EquipmentStore, MemoryStore};
