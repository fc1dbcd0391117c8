use std::path::PathBuf;

use anyhow::Context;

use verisync_config::VerisyncConfig;
use verisync_reconcile::{ReconcileEngine, ReconcilePolicy};
use verisync_registry::RegistryClient;

use crate::adapters::{JsonFileStore, JsonlOutbox};
use crate::cli::{Commands, GlobalFlags};
use crate::output;

type Engine = ReconcileEngine<JsonFileStore, JsonlOutbox, RegistryClient>;

/// Run one command and print its summary.
pub async fn dispatch(
    command: Commands,
    config: &VerisyncConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let engine = build_engine(config, flags)?;
    tracing::debug!(
        store = %engine.store().path().display(),
        outbox = %engine.notifier().path().display(),
        "engine ready"
    );

    let summary = match command {
        Commands::Reconcile { ids } => engine.reconcile(&ids).await?,
        Commands::Sweep { max_total } => {
            let max_total = max_total.unwrap_or(engine.policy().max_total_per_org);
            engine.reconcile_sweep(max_total).await?
        }
    };

    if !flags.quiet {
        output::output(&summary, flags.format)?;
    }
    Ok(())
}

fn build_engine(config: &VerisyncConfig, flags: &GlobalFlags) -> anyhow::Result<Engine> {
    let store_path = PathBuf::from(flags.store.as_deref().unwrap_or(&config.general.store_path));
    let outbox_path =
        PathBuf::from(flags.outbox.as_deref().unwrap_or(&config.general.outbox_path));

    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("failed to open equipment store {}", store_path.display()))?;
    let client =
        RegistryClient::new(&config.registry).context("failed to build registry HTTP client")?;

    Ok(ReconcileEngine::new(
        store,
        JsonlOutbox::new(outbox_path),
        client,
        ReconcilePolicy::from(config),
    ))
}
