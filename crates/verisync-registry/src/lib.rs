//! # verisync-registry
//!
//! HTTP clients for the national metrology registry.
//!
//! Two independent services are queried:
//! - the verification-record search (Solr `select`, "VRI" documents)
//! - the type-approval registry ("MIT" items)
//!
//! The registry is a best-effort enrichment source. Every public search
//! degrades to an empty result on transport errors, timeouts, non-success
//! statuses, or malformed payloads, so one flaky call never aborts a batch.
//! The [`matcher`] module turns raw documents into normalized records.

pub mod matcher;
pub mod mit;
pub mod query;
pub mod vri;

mod error;
mod http;

pub use error::RegistryError;

use std::time::Duration;

use serde_json::Value;
use verisync_config::RegistryConfig;

// ── Types ──────────────────────────────────────────────────────────

/// One page of raw registry documents plus the service's total hit count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub documents: Vec<Value>,
    pub total_found: u64,
}

impl SearchPage {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            documents: Vec::new(),
            total_found: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the verification and type-approval services.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    verification_url: String,
    type_registry_url: String,
}

impl RegistryClient {
    /// Build a client from registry configuration.
    ///
    /// The configured timeout is a hard bound on every request.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// fails to build (e.g. TLS backend initialization).
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            verification_url: config.verification_url.clone(),
            type_registry_url: config.type_registry_url.clone(),
        })
    }
}
