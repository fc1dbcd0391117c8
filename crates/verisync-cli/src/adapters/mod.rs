//! Local collaborator implementations used by the binary.

pub mod file_store;
pub mod outbox;

pub use file_store::JsonFileStore;
pub use outbox::JsonlOutbox;
