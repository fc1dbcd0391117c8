//! Recheck scheduling: which records a reconciliation invocation processes.
//!
//! Eligibility is a conjunction of named rules, evaluated per record through
//! [`EligibilityFilter::matches`].

use chrono::{DateTime, Duration, Utc};

use verisync_core::entities::EquipmentRecord;
use verisync_core::enums::CheckFreshness;

/// One named eligibility condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityRule {
    /// Non-blank serial number or registry number.
    HasIdentifier,
    /// Never checked, or last checked at or before `cutoff`.
    NeverCheckedOrStale { cutoff: DateTime<Utc> },
    /// Id is one of the listed ids.
    IdIn(Vec<String>),
}

impl EligibilityRule {
    #[must_use]
    pub fn matches(&self, record: &EquipmentRecord) -> bool {
        match self {
            Self::HasIdentifier => record.has_identifier(),
            Self::NeverCheckedOrStale { cutoff } => freshness(record, *cutoff).is_due(),
            Self::IdIn(ids) => ids.iter().any(|id| id == &record.id),
        }
    }
}

/// Conjunction of [`EligibilityRule`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityFilter {
    rules: Vec<EligibilityRule>,
}

impl EligibilityFilter {
    /// Explicit ids, processed regardless of freshness.
    #[must_use]
    pub fn targeted(ids: &[String]) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        Self::default()
            .and(EligibilityRule::IdIn(unique))
            .and(EligibilityRule::HasIdentifier)
    }

    /// Every identifiable record whose last check is older than `recheck_after`.
    #[must_use]
    pub fn sweep(now: DateTime<Utc>, recheck_after: Duration) -> Self {
        Self::default()
            .and(EligibilityRule::HasIdentifier)
            .and(EligibilityRule::NeverCheckedOrStale {
                cutoff: stale_cutoff(now, recheck_after),
            })
    }

    #[must_use]
    pub fn and(mut self, rule: EligibilityRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Ids named by an `IdIn` rule, if any.
    #[must_use]
    pub fn target_ids(&self) -> Option<&[String]> {
        self.rules.iter().find_map(|rule| match rule {
            EligibilityRule::IdIn(ids) => Some(ids.as_slice()),
            _ => None,
        })
    }

    #[must_use]
    pub fn matches(&self, record: &EquipmentRecord) -> bool {
        self.rules.iter().all(|rule| rule.matches(record))
    }
}

/// Checks at or before this instant are stale. Windows reaching past the
/// representable range clamp to the earliest instant.
#[must_use]
pub fn stale_cutoff(now: DateTime<Utc>, recheck_after: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(recheck_after)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Where `record` sits in the recheck cycle relative to `cutoff`.
#[must_use]
pub fn freshness(record: &EquipmentRecord, cutoff: DateTime<Utc>) -> CheckFreshness {
    match record.last_external_check_at {
        None => CheckFreshness::NeverChecked,
        Some(checked) if checked <= cutoff => CheckFreshness::Stale,
        Some(_) => CheckFreshness::Fresh,
    }
}

/// Split `records` into processing batches of at most `size`.
pub fn batches(records: &[EquipmentRecord], size: usize) -> impl Iterator<Item = &[EquipmentRecord]> {
    records.chunks(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn record(id: &str, serial: Option<&str>, checked_days_ago: Option<i64>) -> EquipmentRecord {
        let mut record = EquipmentRecord::new(id, "own-1");
        record.serial_number = serial.map(String::from);
        record.last_external_check_at = checked_days_ago.map(|d| now() - Duration::days(d));
        record
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(8), true)]
    #[case(Some(7), true)]
    #[case(Some(6), false)]
    #[case(Some(0), false)]
    fn sweep_staleness(#[case] checked_days_ago: Option<i64>, #[case] eligible: bool) {
        let filter = EligibilityFilter::sweep(now(), Duration::days(7));
        assert_eq!(filter.matches(&record("eq-1", Some("SN"), checked_days_ago)), eligible);
    }

    #[test]
    fn sweep_skips_records_without_identifier() {
        let filter = EligibilityFilter::sweep(now(), Duration::days(7));
        assert!(!filter.matches(&record("eq-1", None, None)));
        assert!(!filter.matches(&record("eq-2", Some(""), None)));

        let mut by_registry = record("eq-3", None, None);
        by_registry.registry_number = Some("48316-11".into());
        assert!(filter.matches(&by_registry));
    }

    #[test]
    fn targeted_ignores_freshness() {
        let filter = EligibilityFilter::targeted(&["eq-1".into()]);
        assert!(filter.matches(&record("eq-1", Some("SN"), Some(0))));
        assert!(!filter.matches(&record("eq-2", Some("SN"), None)));
        assert!(!filter.matches(&record("eq-1", None, None)));
    }

    #[test]
    fn targeted_deduplicates_ids() {
        let filter = EligibilityFilter::targeted(&["a".into(), "b".into(), "a".into()]);
        assert_eq!(filter.target_ids(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(EligibilityFilter::sweep(now(), Duration::days(7)).target_ids(), None);
    }

    #[test]
    fn freshness_states() {
        let cutoff = stale_cutoff(now(), Duration::days(7));
        assert_eq!(freshness(&record("a", None, None), cutoff), CheckFreshness::NeverChecked);
        assert_eq!(freshness(&record("a", None, Some(1)), cutoff), CheckFreshness::Fresh);
        assert_eq!(freshness(&record("a", None, Some(7)), cutoff), CheckFreshness::Stale);
        assert_eq!(freshness(&record("a", None, Some(30)), cutoff), CheckFreshness::Stale);
    }

    #[test]
    fn oversized_recheck_window_clamps_instead_of_overflowing() {
        let window = Duration::days(100_000_000);
        assert_eq!(stale_cutoff(now(), window), DateTime::<Utc>::MIN_UTC);

        let filter = EligibilityFilter::sweep(now(), window);
        assert!(filter.matches(&record("eq-1", Some("SN"), None)));
        assert!(!filter.matches(&record("eq-2", Some("SN"), Some(30))));
    }

    #[test]
    fn batches_cover_all_records() {
        let records: Vec<_> = (0..5).map(|i| record(&format!("eq-{i}"), None, None)).collect();
        let sizes: Vec<usize> = batches(&records, 2).map(<[EquipmentRecord]>::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(batches(&records, 0).count(), 5);
    }
}
