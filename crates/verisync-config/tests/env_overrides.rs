use figment::Jail;
use verisync_config::VerisyncConfig;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("VERISYNC_REGISTRY__TIMEOUT_SECS", "8");
        jail.set_env("VERISYNC_RECONCILE__RECHECK_AFTER_DAYS", "14");
        jail.set_env("VERISYNC_REGISTRY__ORGANIZATION_NAME", "Metrology Center");

        let config = VerisyncConfig::load().expect("config loads");
        assert_eq!(config.registry.timeout_secs, 8);
        assert_eq!(config.reconcile.recheck_after_days, 14);
        assert!(config.registry.has_organization());
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".verisync")?;
        jail.create_file(
            ".verisync/config.toml",
            r#"
[registry]
timeout_secs = 9
max_total_per_org = 200
"#,
        )?;
        jail.set_env("VERISYNC_REGISTRY__TIMEOUT_SECS", "10");

        let config = VerisyncConfig::load().expect("config loads");
        assert_eq!(config.registry.timeout_secs, 10);
        assert_eq!(config.registry.max_total_per_org, 200);
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("VERISYNC_REGISTRY__TIMEOUT_SECS", "600");
        assert!(VerisyncConfig::load().is_err());
        Ok(())
    });
}

#[test]
fn timeout_just_above_registry_window_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("VERISYNC_REGISTRY__TIMEOUT_SECS", "11");
        assert!(VerisyncConfig::load().is_err());
        Ok(())
    });
}
