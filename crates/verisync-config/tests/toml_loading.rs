//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use verisync_config::VerisyncConfig;

#[test]
fn loads_registry_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[registry]
verification_url = "http://localhost:8983/solr/vri/select"
type_registry_url = "http://localhost:8080/mit"
reference_base_url = "http://localhost:8080/results"
timeout_secs = 8
max_total_per_org = 300
organization_name = "Metrology Center"
"#,
        )?;

        let config: VerisyncConfig = Figment::from(Serialized::defaults(VerisyncConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.registry.verification_url,
            "http://localhost:8983/solr/vri/select"
        );
        assert_eq!(config.registry.type_registry_url, "http://localhost:8080/mit");
        assert_eq!(config.registry.timeout_secs, 8);
        assert_eq!(config.registry.max_total_per_org, 300);
        assert_eq!(config.registry.organization_name, "Metrology Center");
        // untouched keys keep their defaults
        assert_eq!(config.registry.user_agent, "verisync/0.1");
        Ok(())
    });
}

#[test]
fn loads_reconcile_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[reconcile]
recheck_after_days = 3
mismatch_tolerance_days = 1
notify_dedup_hours = 48
"#,
        )?;

        let config: VerisyncConfig = Figment::from(Serialized::defaults(VerisyncConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.reconcile.recheck_after_days, 3);
        assert_eq!(config.reconcile.mismatch_tolerance_days, 1);
        assert_eq!(config.reconcile.notify_dedup_hours, 48);
        assert_eq!(config.reconcile.batch_size, 50);
        Ok(())
    });
}

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
store_path = "/var/lib/verisync/equipment.json"
"#,
        )?;

        let config: VerisyncConfig = Figment::from(Serialized::defaults(VerisyncConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.store_path, "/var/lib/verisync/equipment.json");
        assert_eq!(config.general.outbox_path, ".verisync/outbox.jsonl");
        Ok(())
    });
}

#[test]
fn empty_toml_yields_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "")?;

        let config: VerisyncConfig = Figment::from(Serialized::defaults(VerisyncConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.registry.timeout_secs, 10);
        assert_eq!(config.reconcile.recheck_after_days, 7);
        Ok(())
    });
}
