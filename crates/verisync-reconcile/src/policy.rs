//! Engine configuration, resolved once at construction.

use chrono::Duration;
use verisync_config::VerisyncConfig;
use verisync_registry::vri::DEFAULT_MAX_TOTAL;

/// Everything the engine needs to know about thresholds and links.
///
/// Built from [`VerisyncConfig`]; tests construct it directly.
#[derive(Debug, Clone)]
pub struct ReconcilePolicy {
    /// Minimum age of the last check before a sweep rechecks a record.
    pub recheck_after: Duration,
    /// Allowed drift between local and registry valid-until dates.
    pub mismatch_tolerance: Duration,
    /// Minimum forward move of valid-until that counts as a new verification.
    pub notify_dedup_window: Duration,
    pub batch_size: usize,
    /// Verifying organization to prefetch during sweeps, if any.
    pub organization_name: Option<String>,
    pub max_total_per_org: u32,
    pub reference_base_url: String,
    pub type_reference_base_url: String,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self::from(&VerisyncConfig::default())
    }
}

impl From<&VerisyncConfig> for ReconcilePolicy {
    fn from(config: &VerisyncConfig) -> Self {
        let reconcile = &config.reconcile;
        let registry = &config.registry;
        Self {
            recheck_after: Duration::days(i64::from(reconcile.recheck_after_days)),
            mismatch_tolerance: Duration::days(i64::from(reconcile.mismatch_tolerance_days)),
            notify_dedup_window: Duration::hours(i64::from(reconcile.notify_dedup_hours)),
            batch_size: reconcile.batch_size.max(1),
            organization_name: registry
                .has_organization()
                .then(|| registry.organization_name.trim().to_string()),
            max_total_per_org: if registry.max_total_per_org == 0 {
                DEFAULT_MAX_TOTAL
            } else {
                registry.max_total_per_org
            },
            reference_base_url: registry.reference_base_url.clone(),
            type_reference_base_url: registry.type_reference_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_config_defaults() {
        let policy = ReconcilePolicy::default();
        assert_eq!(policy.recheck_after, Duration::days(7));
        assert_eq!(policy.mismatch_tolerance, Duration::days(3));
        assert_eq!(policy.notify_dedup_window, Duration::hours(24));
        assert_eq!(policy.max_total_per_org, 500);
        assert!(policy.organization_name.is_none());
    }

    #[test]
    fn organization_is_trimmed() {
        let mut config = VerisyncConfig::default();
        config.registry.organization_name = " Metrology Center ".into();
        let policy = ReconcilePolicy::from(&config);
        assert_eq!(policy.organization_name.as_deref(), Some("Metrology Center"));
    }
}
