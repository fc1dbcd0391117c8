//! External metrology registry configuration.

use serde::{Deserialize, Serialize};

fn default_verification_url() -> String {
    String::from("https://fgis.gost.ru/fundmetrology/cm/xcdb/vri/select")
}

fn default_type_registry_url() -> String {
    String::from("https://fgis.gost.ru/fundmetrology/eapi/mit")
}

fn default_reference_base_url() -> String {
    String::from("https://fgis.gost.ru/fundmetrology/cm/results")
}

fn default_type_reference_base_url() -> String {
    String::from("https://fgis.gost.ru/fundmetrology/registry/4/items")
}

fn default_user_agent() -> String {
    String::from("verisync/0.1")
}

/// Hard per-request timeout.
const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_total_per_org() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Solr select endpoint of the verification-record service.
    #[serde(default = "default_verification_url")]
    pub verification_url: String,

    /// Search endpoint of the type-approval service.
    #[serde(default = "default_type_registry_url")]
    pub type_registry_url: String,

    /// Public page prefix for verification records.
    #[serde(default = "default_reference_base_url")]
    pub reference_base_url: String,

    /// Public page prefix for type-approval records.
    #[serde(default = "default_type_reference_base_url")]
    pub type_reference_base_url: String,

    /// Per-request timeout, 8 to 10 seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on records pulled by an organization prefetch.
    #[serde(default = "default_max_total_per_org")]
    pub max_total_per_org: u32,

    /// Verifying organization title used to prefetch records during a sweep.
    /// Empty disables the prefetch.
    #[serde(default)]
    pub organization_name: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            verification_url: default_verification_url(),
            type_registry_url: default_type_registry_url(),
            reference_base_url: default_reference_base_url(),
            type_reference_base_url: default_type_reference_base_url(),
            timeout_secs: default_timeout_secs(),
            max_total_per_org: default_max_total_per_org(),
            organization_name: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl RegistryConfig {
    /// Whether sweeps should prefetch the organization's records.
    #[must_use]
    pub fn has_organization(&self) -> bool {
        !self.organization_name.trim().is_empty()
    }
}
