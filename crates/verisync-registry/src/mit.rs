//! Type-approval registry search.
//!
//! Single page, first result: the caller only needs to know whether the
//! instrument type is registered and where its record lives.

use serde_json::Value;

use crate::http::get_json;
use crate::{RegistryClient, error::RegistryError};

#[derive(serde::Deserialize)]
struct MitEnvelope {
    result: MitResult,
}

#[derive(serde::Deserialize)]
struct MitResult {
    #[serde(default)]
    items: Vec<Value>,
}

impl RegistryClient {
    /// Look up `query_term` in the type-approval registry.
    ///
    /// Returns the first item, or `None` when nothing matched or the call
    /// failed (the failure is logged).
    pub async fn search_type_registry(&self, query_term: &str) -> Option<Value> {
        if query_term.trim().is_empty() {
            return None;
        }
        match self.search_type_registry_page(query_term, 1, 0).await {
            Ok(items) => items.into_iter().next(),
            Err(e) => {
                tracing::warn!(query_term, timeout = e.is_timeout(), %e, "type registry search failed");
                None
            }
        }
    }

    async fn search_type_registry_page(
        &self,
        query_term: &str,
        rows: u32,
        start: u32,
    ) -> Result<Vec<Value>, RegistryError> {
        let url = format!(
            "{}?search={}&rows={rows}&start={start}",
            self.type_registry_url,
            urlencoding::encode(query_term.trim())
        );
        let envelope: MitEnvelope = get_json(&self.http, &url).await?;
        Ok(envelope.result.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "result": {
            "count": 2,
            "items": [
                { "mit_uuid": "f2a1b6c0", "number": "48316-11", "title": "Manometers", "notation": ["MP-100"] },
                { "mit_uuid": "a91c0d22", "number": "48316-16", "title": "Manometers" }
            ]
        }
    }"#;

    #[test]
    fn parse_mit_envelope() {
        let envelope: MitEnvelope = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(envelope.result.items.len(), 2);
        assert_eq!(envelope.result.items[0]["number"], "48316-11");
    }

    #[test]
    fn parse_mit_envelope_without_items() {
        let envelope: MitEnvelope = serde_json::from_str(r#"{ "result": { "count": 0 } }"#).unwrap();
        assert!(envelope.result.items.is_empty());
    }
}
