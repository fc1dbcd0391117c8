//! Verification-record search (Solr `select` endpoint).

use serde_json::Value;
use tokio::task::JoinSet;

use crate::http::get_json;
use crate::query::{org_filter, remaining_offsets, select_query, wildcard_filter};
use crate::{RegistryClient, SearchPage, error::RegistryError};

/// Page size used when walking an organization's records.
pub const ORG_PAGE_SIZE: u32 = 100;

/// Default cap on records fetched for one organization.
pub const DEFAULT_MAX_TOTAL: u32 = 500;

#[derive(serde::Deserialize)]
struct SolrEnvelope {
    response: SolrResponse,
}

#[derive(serde::Deserialize)]
struct SolrResponse {
    #[serde(rename = "numFound", default)]
    num_found: u64,
    #[serde(default)]
    docs: Vec<Value>,
}

impl From<SolrEnvelope> for SearchPage {
    fn from(envelope: SolrEnvelope) -> Self {
        Self {
            documents: envelope.response.docs,
            total_found: envelope.response.num_found,
        }
    }
}

impl RegistryClient {
    /// Wildcard substring search for `query_term` over serial and type
    /// registry number.
    ///
    /// Never fails: any error is logged and reported as an empty page.
    pub async fn search_verification_records(
        &self,
        query_term: &str,
        page_size: u32,
        start: u32,
    ) -> SearchPage {
        if query_term.trim().is_empty() {
            return SearchPage::empty();
        }
        let filter = wildcard_filter(query_term);
        self.select(&filter, page_size, start)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(query_term, timeout = e.is_timeout(), %e, "verification search failed");
                SearchPage::empty()
            })
    }

    /// Exact-phrase search over the verifying organization title.
    ///
    /// Never fails: any error is logged and reported as an empty page.
    pub async fn search_verification_records_by_exact_org(
        &self,
        org_name: &str,
        page_size: u32,
        start: u32,
    ) -> SearchPage {
        if org_name.trim().is_empty() {
            return SearchPage::empty();
        }
        let filter = org_filter(org_name);
        self.select(&filter, page_size, start)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(org_name, start, timeout = e.is_timeout(), %e, "organization search failed");
                SearchPage::empty()
            })
    }

    /// Fetch every record of an organization, up to `max_total`.
    ///
    /// The first page reveals the hit count; the remaining pages are fetched
    /// concurrently and appended in page order. A failed page contributes
    /// nothing instead of failing the whole walk.
    pub async fn fetch_all_pages_for_org(&self, org_name: &str, max_total: u32) -> Vec<Value> {
        let first = self
            .search_verification_records_by_exact_org(org_name, ORG_PAGE_SIZE, 0)
            .await;
        let offsets = remaining_offsets(first.total_found, max_total, ORG_PAGE_SIZE);

        let mut pages: Vec<Vec<Value>> = vec![Vec::new(); offsets.len()];
        let mut set = JoinSet::new();
        for (idx, start) in offsets.into_iter().enumerate() {
            let client = self.clone();
            let org = org_name.to_string();
            set.spawn(async move {
                let page = client
                    .search_verification_records_by_exact_org(&org, ORG_PAGE_SIZE, start)
                    .await;
                (idx, page.documents)
            });
        }
        while let Some(res) = set.join_next().await {
            match res {
                Ok((idx, docs)) => pages[idx] = docs,
                Err(e) => tracing::warn!(%e, "organization page task failed"),
            }
        }

        let mut documents = first.documents;
        documents.extend(pages.into_iter().flatten());
        documents.truncate(usize::try_from(max_total).unwrap_or(usize::MAX));
        tracing::debug!(org_name, fetched = documents.len(), total_found = first.total_found, "organization records fetched");
        documents
    }

    async fn select(&self, filter: &str, rows: u32, start: u32) -> Result<SearchPage, RegistryError> {
        let url = format!(
            "{}?{}",
            self.verification_url,
            select_query(filter, rows, start)
        );
        let envelope: SolrEnvelope = get_json(&self.http, &url).await?;
        Ok(envelope.into())
    }
}
