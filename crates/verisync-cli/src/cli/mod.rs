use clap::{Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `vsync` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vsync",
    version,
    about = "verisync - reconcile equipment verification status against the metrology registry"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no summary output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Equipment store file (overrides general.store_path)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Notification outbox file (overrides general.outbox_path)
    #[arg(long, global = true)]
    pub outbox: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check specific equipment records now, regardless of freshness
    Reconcile {
        /// Equipment id (repeatable)
        #[arg(long = "id", required = true, num_args = 1)]
        ids: Vec<String>,
    },
    /// Check every record whose last check is older than the recheck window
    Sweep {
        /// Cap on organization records prefetched from the registry
        #[arg(long)]
        max_total: Option<u32>,
    },
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            store: self.store.clone(),
            outbox: self.outbox.clone(),
        }
    }
}
