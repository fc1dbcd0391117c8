//! Reconciliation orchestration.
//!
//! One invocation = one store selection, then each selected record in turn:
//! registry lookups, status reconciliation, notification gate, one store
//! write. Records are processed sequentially so the registry sees at most one
//! in-flight request from a pass (the organization prefetch is the only
//! concurrent fetch). After the last record, notification events are handed
//! to the notifier as one batch per owner.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use verisync_core::entities::{EquipmentRecord, ExternalVerificationRecord};
use verisync_core::notification::NotificationEvent;
use verisync_core::responses::{ReconcileMode, ReconciliationSummary, RecordOutcome};
use verisync_registry::matcher::select_best_match;

use crate::error::{ReconcileError, StoreError};
use crate::notify::{OwnerNotifier, event_for, group_by_owner, should_notify};
use crate::policy::ReconcilePolicy;
use crate::reconciler::{Observation, reconcile_record};
use crate::schedule::{EligibilityFilter, batches};
use crate::source::VerificationSource;

/// Prefetched organization records keyed by normalized serial number.
#[derive(Debug, Default)]
pub struct OrgIndex {
    by_serial: HashMap<String, Vec<ExternalVerificationRecord>>,
}

impl OrgIndex {
    #[must_use]
    pub fn build(records: Vec<ExternalVerificationRecord>) -> Self {
        let mut by_serial: HashMap<String, Vec<ExternalVerificationRecord>> = HashMap::new();
        for record in records {
            let key = normalize_serial(&record.serial_number);
            if !key.is_empty() {
                by_serial.entry(key).or_default().push(record);
            }
        }
        Self { by_serial }
    }

    /// Candidates for `record`, matched on serial number only.
    #[must_use]
    pub fn lookup(&self, record: &EquipmentRecord) -> Option<&[ExternalVerificationRecord]> {
        let serial = normalize_serial(record.serial()?);
        self.by_serial.get(&serial).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_serial.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_serial.is_empty()
    }
}

fn normalize_serial(serial: &str) -> String {
    serial.trim().to_uppercase()
}

/// The reconciliation engine, generic over its three collaborators.
pub struct ReconcileEngine<S, N, V> {
    store: S,
    notifier: N,
    source: V,
    policy: ReconcilePolicy,
}

impl<S, N, V> ReconcileEngine<S, N, V>
where
    S: crate::store::EquipmentStore,
    N: OwnerNotifier,
    V: VerificationSource,
{
    #[must_use]
    pub const fn new(store: S, notifier: N, source: V, policy: ReconcilePolicy) -> Self {
        Self {
            store,
            notifier,
            source,
            policy,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    #[must_use]
    pub const fn source(&self) -> &V {
        &self.source
    }

    #[must_use]
    pub const fn policy(&self) -> &ReconcilePolicy {
        &self.policy
    }

    /// Check the given records now, regardless of when they were last checked.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] if the records cannot be loaded.
    pub async fn reconcile(
        &self,
        target_ids: &[String],
    ) -> Result<ReconciliationSummary, ReconcileError> {
        self.reconcile_at(target_ids, Utc::now()).await
    }

    /// [`Self::reconcile`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] if the records cannot be loaded.
    pub async fn reconcile_at(
        &self,
        target_ids: &[String],
        now: DateTime<Utc>,
    ) -> Result<ReconciliationSummary, ReconcileError> {
        let filter = EligibilityFilter::targeted(target_ids);
        let requested = filter.target_ids().map_or(0, <[String]>::len);
        let records = self.select(&filter, ReconcileMode::Targeted).await?;

        let mut summary = self
            .run(ReconcileMode::Targeted, &records, None, now)
            .await;
        summary.skipped = to_u32(requested.saturating_sub(records.len()));
        if summary.skipped > 0 {
            tracing::warn!(
                skipped = summary.skipped,
                "targeted ids not found or without serial/registry number"
            );
        }
        Ok(summary)
    }

    /// Check every identifiable record not checked within the recheck window.
    ///
    /// `max_total_per_org_page` caps the organization prefetch.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] if the records cannot be loaded.
    pub async fn reconcile_sweep(
        &self,
        max_total_per_org_page: u32,
    ) -> Result<ReconciliationSummary, ReconcileError> {
        self.reconcile_sweep_at(max_total_per_org_page, Utc::now())
            .await
    }

    /// [`Self::reconcile_sweep`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] if the records cannot be loaded.
    pub async fn reconcile_sweep_at(
        &self,
        max_total_per_org_page: u32,
        now: DateTime<Utc>,
    ) -> Result<ReconciliationSummary, ReconcileError> {
        let filter = EligibilityFilter::sweep(now, self.policy.recheck_after);
        let records = self.select(&filter, ReconcileMode::Sweep).await?;

        let index = match &self.policy.organization_name {
            Some(org) if !records.is_empty() => {
                let prefetched = self
                    .source
                    .org_verifications(org, max_total_per_org_page)
                    .await;
                let index = OrgIndex::build(prefetched);
                tracing::debug!(organization = %org, serials = index.len(), "organization records prefetched");
                Some(index)
            }
            _ => None,
        };

        Ok(self
            .run(ReconcileMode::Sweep, &records, index.as_ref(), now)
            .await)
    }

    async fn select(
        &self,
        filter: &EligibilityFilter,
        mode: ReconcileMode,
    ) -> Result<Vec<EquipmentRecord>, ReconcileError> {
        self.store.find_eligible(filter).await.map_err(|e| {
            tracing::error!(%mode, %e, "could not select equipment for reconciliation");
            ReconcileError::from(e)
        })
    }

    async fn run(
        &self,
        mode: ReconcileMode,
        records: &[EquipmentRecord],
        index: Option<&OrgIndex>,
        now: DateTime<Utc>,
    ) -> ReconciliationSummary {
        let mut summary = ReconciliationSummary::empty(mode);
        let mut events = Vec::new();

        for (batch_no, batch) in batches(records, self.policy.batch_size).enumerate() {
            for record in batch {
                match self.reconcile_one(record, index, now).await {
                    Ok((outcome, event)) => {
                        summary.checked += 1;
                        summary.results.push(outcome);
                        events.extend(event);
                    }
                    Err(e) => {
                        summary.failed += 1;
                        tracing::warn!(id = %record.id, %e, "reconciliation skipped for record");
                    }
                }
            }
            tracing::debug!(%mode, batch = batch_no, done = summary.checked + summary.failed, total = records.len(), "batch reconciled");
        }

        summary.notifications = to_u32(events.len());
        self.dispatch(events).await;

        tracing::info!(
            %mode,
            checked = summary.checked,
            failed = summary.failed,
            mismatches = summary.mismatches(),
            notifications = summary.notifications,
            "reconciliation finished"
        );
        summary
    }

    async fn observe(
        &self,
        record: &EquipmentRecord,
        index: Option<&OrgIndex>,
        today: NaiveDate,
    ) -> Observation {
        let Some(term) = record.query_term() else {
            return Observation::default();
        };

        // A prefetch hit only stands in for the per-record search while it is
        // still current. Another organization may hold a newer verification.
        let prefetched = index
            .and_then(|i| i.lookup(record))
            .map(<[ExternalVerificationRecord]>::to_vec)
            .unwrap_or_default();
        let mut best = select_best_match(prefetched.iter().cloned())
            .filter(|best| best.valid_until_date.is_some_and(|d| d >= today));
        if best.is_none() {
            let searched = self.source.find_verifications(term).await;
            best = select_best_match(searched.into_iter().chain(prefetched));
        }
        let Some(verification) = best else {
            return Observation::default();
        };

        let type_term = verification.type_registry().unwrap_or(term).to_string();
        let type_approval = self.source.find_type_approval(&type_term).await;
        Observation {
            verification: Some(verification),
            type_approval,
        }
    }

    async fn reconcile_one(
        &self,
        record: &EquipmentRecord,
        index: Option<&OrgIndex>,
        now: DateTime<Utc>,
    ) -> Result<(RecordOutcome, Option<NotificationEvent>), StoreError> {
        let observation = self.observe(record, index, now.date_naive()).await;
        let mut result = reconcile_record(record, &observation, now, &self.policy);

        let event = result.observed_valid_until.and_then(|valid_until| {
            should_notify(
                valid_until,
                record.last_notified_valid_until,
                now.date_naive(),
                self.policy.notify_dedup_window,
            )
            .then(|| {
                result.update.last_notified_valid_until = Some(valid_until);
                event_for(record, valid_until, result.reference_url.clone())
            })
        });

        self.store.update_equipment(&record.id, &result.update).await?;
        tracing::debug!(
            id = %record.id,
            matched = observation.verification.is_some(),
            mismatch = result.mismatch,
            fields = ?result.update.changed_fields(),
            "record reconciled"
        );

        Ok((
            RecordOutcome {
                id: record.id.clone(),
                mismatch: result.mismatch,
                new_valid_until: result.valid_until,
                reference_url: result.reference_url,
                notified: event.is_some(),
            },
            event,
        ))
    }

    async fn dispatch(&self, events: Vec<NotificationEvent>) {
        for batch in group_by_owner(events) {
            if let Err(e) = self.notifier.notify_owner(&batch).await {
                tracing::warn!(owner_id = %batch.owner_id, items = batch.len(), %e, "owner notification failed");
            }
        }
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
