//! `platform` — CLI for provisioning governed cloud resources.
//!
//! Every resource created through this tool is tagged with a fixed
//! provenance marker, and every mutation of an existing resource is gated
//! on that marker. The heavy lifting lives in `platform-guard`; this crate
//! is the argument boundary, the interactive confirmation prompt, and the
//! outcome reporting.
//!
//! ## Commands
//!
//! - `platform instance {create|list|start|stop}`
//! - `platform bucket {create|list|upload}`
//! - `platform zone {create|list|record}`
//!
//! Exit status: 0 on success, 1 on a remote failure, 2 on a policy denial,
//! 3 when a resource was created but could not be tagged (it exists but is
//! unmanaged).

mod bucket_cmd;
mod instance_cmd;
mod report;
mod zone_cmd;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use platform_guard::{Guard, GuardConfig};
use platform_provider::{HttpStore, ProviderConfig};

#[derive(Debug, Parser)]
#[command(
    name = "platform",
    version,
    about = "Platform engineering CLI for managing governed cloud resources"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage compute instances.
    Instance(instance_cmd::InstanceCli),
    /// Manage storage buckets.
    Bucket(bucket_cmd::BucketCli),
    /// Manage DNS zones and records.
    Zone(zone_cmd::ZoneCli),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = GuardConfig::default();
    tracing::debug!(
        provenance_key = %cfg.provenance_key,
        provenance_value = %cfg.provenance_value,
        cap = cfg.instance_cap,
        "guard configuration"
    );
    let store = HttpStore::new(ProviderConfig::from_env());
    let guard = Guard::new(&store, &cfg);

    match cli.command {
        Command::Instance(cmd) => cmd.run(&guard).await,
        Command::Bucket(cmd) => cmd.run(&guard).await,
        Command::Zone(cmd) => cmd.run(&guard).await,
    }
}
