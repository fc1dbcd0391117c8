//! # verisync-core
//!
//! Core types shared across all verisync crates.
//!
//! This crate provides the foundational domain model of the verification
//! reconciliation engine:
//! - Entity structs for local equipment and ephemeral registry records
//! - The equipment status enum with its transition table
//! - Partial update builder used as the single per-record store write
//! - Notification events and per-owner batches
//! - Reconciliation summary types returned to callers
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod notification;
pub mod responses;
pub mod update;
