//! `platform zone` subcommands.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use platform_guard::{
    CloudStore, Environment, Guard, ProvisionRequest, RecordSpec, RecordType, ZoneSpec,
};

use crate::report;

#[derive(Debug, Parser)]
pub struct ZoneCli {
    #[command(subcommand)]
    command: ZoneSubcommand,
}

#[derive(Debug, Subcommand)]
enum ZoneSubcommand {
    /// Create a new DNS zone.
    Create(CreateArgs),
    /// List zones managed by this tool.
    List,
    /// Create or replace a record in a managed zone.
    Record(RecordArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Zone name, e.g. example.com.
    name: String,

    /// Name of the owner.
    #[arg(long)]
    owner: String,

    /// Project name.
    #[arg(long)]
    project: String,

    /// Environment: dev, test or prod.
    #[arg(long = "env")]
    environment: Environment,
}

#[derive(Debug, Args)]
struct RecordArgs {
    /// Remote zone id. The zone's tags authorize the change; records carry
    /// no tags of their own.
    zone_id: String,

    /// Record name, e.g. www.example.com.
    name: String,

    /// Record value, e.g. 1.2.3.4.
    value: String,

    /// Record type: A, AAAA, CNAME or TXT.
    #[arg(long = "type", default_value = "A")]
    record_type: RecordType,
}

impl ZoneCli {
    pub async fn run<S: CloudStore>(&self, guard: &Guard<'_, S>) -> ExitCode {
        match &self.command {
            ZoneSubcommand::Create(args) => {
                let req = ProvisionRequest {
                    owner: args.owner.clone(),
                    project: args.project.clone(),
                    environment: args.environment,
                };
                let spec = ZoneSpec {
                    name: args.name.clone(),
                };
                report::report(&guard.create_zone(&req, &spec).await)
            }
            ZoneSubcommand::List => match guard.list_zones().await {
                Ok(zones) => {
                    if zones.is_empty() {
                        println!("No managed zones found.");
                    }
                    for zone in &zones {
                        println!(
                            "- ID: {}, Name: {}, Owner={}, Env={}",
                            zone.id,
                            zone.name,
                            zone.tags.get("Owner").unwrap_or("-"),
                            zone.tags.get("Environment").unwrap_or("-"),
                        );
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::from(report::EXIT_FAILED)
                }
            },
            ZoneSubcommand::Record(args) => {
                let spec = RecordSpec {
                    zone_id: args.zone_id.clone(),
                    name: args.name.clone(),
                    record_type: args.record_type,
                    value: args.value.clone(),
                };
                report::report(&guard.upsert_record(&spec).await)
            }
        }
    }
}
