//! Registry lookups as seen by the engine.
//!
//! [`VerificationSource`] hides the HTTP client and the raw document shapes:
//! it answers with normalized records and never fails, matching the registry
//! client's degrade-to-empty contract.

use async_trait::async_trait;

use verisync_core::entities::{ExternalVerificationRecord, TypeApprovalRecord};
use verisync_registry::{RegistryClient, matcher};

/// Rows requested per record search; sorted newest first by the service.
pub const RECORD_SEARCH_ROWS: u32 = 20;

#[async_trait]
pub trait VerificationSource: Send + Sync {
    /// Verification records whose serial or type number contains `term`.
    async fn find_verifications(&self, term: &str) -> Vec<ExternalVerificationRecord>;

    /// First type-approval entry for `term`.
    async fn find_type_approval(&self, term: &str) -> Option<TypeApprovalRecord>;

    /// Every verification performed by `organization`, up to `max_total`.
    async fn org_verifications(
        &self,
        organization: &str,
        max_total: u32,
    ) -> Vec<ExternalVerificationRecord>;
}

#[async_trait]
impl VerificationSource for RegistryClient {
    async fn find_verifications(&self, term: &str) -> Vec<ExternalVerificationRecord> {
        let page = self
            .search_verification_records(term, RECORD_SEARCH_ROWS, 0)
            .await;
        matcher::match_verifications(&page.documents)
    }

    async fn find_type_approval(&self, term: &str) -> Option<TypeApprovalRecord> {
        self.search_type_registry(term)
            .await
            .as_ref()
            .and_then(matcher::match_type_approval)
    }

    async fn org_verifications(
        &self,
        organization: &str,
        max_total: u32,
    ) -> Vec<ExternalVerificationRecord> {
        let docs = self.fetch_all_pages_for_org(organization, max_total).await;
        matcher::match_verifications(&docs)
    }
}
