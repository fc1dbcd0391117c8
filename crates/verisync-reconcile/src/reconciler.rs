//! Status reconciliation for one equipment record.
//!
//! Pure: given the local record, what the registry said about it, and the
//! current time, compute the single update to persist. No I/O happens here.

use chrono::{DateTime, NaiveDate, Utc};

use verisync_core::entities::{EquipmentRecord, ExternalVerificationRecord, TypeApprovalRecord};
use verisync_core::enums::EquipmentStatus;
use verisync_core::update::{EquipmentUpdate, EquipmentUpdateBuilder};

use crate::policy::ReconcilePolicy;

/// What the registry reported for one record during this pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Best-matching verification record, if any.
    pub verification: Option<ExternalVerificationRecord>,
    /// Type-approval lookup result; only meaningful with a verification.
    pub type_approval: Option<TypeApprovalRecord>,
}

/// Outcome of reconciling one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub update: EquipmentUpdate,
    /// Mismatch flag as it stands after the update.
    pub mismatch: bool,
    /// Local valid-until as it stands after the update.
    pub valid_until: Option<NaiveDate>,
    /// Registry valid-until observed in this pass.
    pub observed_valid_until: Option<NaiveDate>,
    pub reference_url: Option<String>,
}

/// Whether the registry contradicts local belief.
///
/// Evaluated against the record's state before this pass:
/// - registry says expired while the record is still `active`/`pending`, or
/// - local valid-until is known and differs from the registry's by more than
///   the tolerance.
#[must_use]
pub fn compute_mismatch(
    status: EquipmentStatus,
    local_valid_until: Option<NaiveDate>,
    external_valid_until: NaiveDate,
    today: NaiveDate,
    policy: &ReconcilePolicy,
) -> bool {
    if external_valid_until < today && status.is_live() {
        return true;
    }
    local_valid_until.is_some_and(|local| {
        let drift = if external_valid_until > local {
            external_valid_until - local
        } else {
            local - external_valid_until
        };
        drift > policy.mismatch_tolerance
    })
}

/// Compute the update for `record` from `observation` at `now`.
#[must_use]
pub fn reconcile_record(
    record: &EquipmentRecord,
    observation: &Observation,
    now: DateTime<Utc>,
    policy: &ReconcilePolicy,
) -> Reconciliation {
    let today = now.date_naive();
    let builder = EquipmentUpdateBuilder::new().last_external_check_at(now);

    let Some(verification) = &observation.verification else {
        return Reconciliation {
            update: builder.build(),
            mismatch: record.mismatch_flag,
            valid_until: record.verification_valid_until,
            observed_valid_until: None,
            reference_url: record.external_reference_url.clone(),
        };
    };

    let reference_url = verification.reference_url(&policy.reference_base_url);
    let type_approval_url = observation
        .type_approval
        .as_ref()
        .and_then(|t| t.reference_url(&policy.type_reference_base_url));
    let mut builder = builder
        .external_reference_url(reference_url.clone())
        .type_approval_flag(Some(observation.type_approval.is_some()))
        .type_approval_url(type_approval_url);

    let Some(external_valid_until) = verification.valid_until_date else {
        return Reconciliation {
            update: builder.build(),
            mismatch: record.mismatch_flag,
            valid_until: record.verification_valid_until,
            observed_valid_until: None,
            reference_url,
        };
    };

    let mismatch = compute_mismatch(
        record.status,
        record.verification_valid_until,
        external_valid_until,
        today,
        policy,
    );
    builder = builder
        .mismatch_flag(mismatch)
        .verification_valid_until(Some(external_valid_until));

    if external_valid_until < today
        && record.status.can_auto_transition_to(EquipmentStatus::Expired)
    {
        builder = builder.status(EquipmentStatus::Expired);
    }

    Reconciliation {
        update: builder.build(),
        mismatch,
        valid_until: Some(external_valid_until),
        observed_valid_until: Some(external_valid_until),
        reference_url,
    }
}
