//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_store_path() -> String {
    String::from(".verisync/equipment.json")
}

fn default_outbox_path() -> String {
    String::from(".verisync/outbox.jsonl")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// JSON file holding the equipment inventory for the CLI store.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// JSONL file the CLI appends notification batches to.
    #[serde(default = "default_outbox_path")]
    pub outbox_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            outbox_path: default_outbox_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.store_path, ".verisync/equipment.json");
        assert_eq!(config.outbox_path, ".verisync/outbox.jsonl");
    }
}
