//! `platform instance` subcommands.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use platform_guard::{CloudStore, Environment, Guard, InstanceSpec, ProvisionRequest};

use crate::report;

/// Default provider size class for new instances.
const DEFAULT_SIZE_CLASS: &str = "t2.micro";

/// Default machine image for new instances.
const DEFAULT_IMAGE_ID: &str = "img-base";

#[derive(Debug, Parser)]
pub struct InstanceCli {
    #[command(subcommand)]
    command: InstanceSubcommand,
}

#[derive(Debug, Subcommand)]
enum InstanceSubcommand {
    /// Create a new compute instance (subject to the instance quota).
    Create(CreateArgs),
    /// List instances managed by this tool.
    List,
    /// Start a managed instance.
    Start(TargetArgs),
    /// Stop a managed instance.
    Stop(TargetArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Name of the owner.
    #[arg(long)]
    owner: String,

    /// Project name.
    #[arg(long)]
    project: String,

    /// Environment: dev, test or prod.
    #[arg(long = "env")]
    environment: Environment,

    /// Provider size class.
    #[arg(long = "size", default_value = DEFAULT_SIZE_CLASS)]
    size_class: String,

    /// Provider machine image id.
    #[arg(long = "image", default_value = DEFAULT_IMAGE_ID)]
    image_id: String,
}

#[derive(Debug, Args)]
struct TargetArgs {
    /// Remote instance id.
    id: String,
}

impl InstanceCli {
    pub async fn run<S: CloudStore>(&self, guard: &Guard<'_, S>) -> ExitCode {
        match &self.command {
            InstanceSubcommand::Create(args) => {
                let req = ProvisionRequest {
                    owner: args.owner.clone(),
                    project: args.project.clone(),
                    environment: args.environment,
                };
                let spec = InstanceSpec {
                    size_class: args.size_class.clone(),
                    image_id: args.image_id.clone(),
                };
                println!(
                    "Creating instance for {} in {}...",
                    args.owner, args.environment
                );
                report::report(&guard.create_instance(&req, &spec).await)
            }
            InstanceSubcommand::List => match guard.list_instances().await {
                Ok(instances) => {
                    if instances.is_empty() {
                        println!("No active instances found.");
                    }
                    for instance in &instances {
                        println!(
                            "- ID: {}, Type: {}, State: {}",
                            instance.id, instance.size_class, instance.state
                        );
                        println!(
                            "  Tags: Owner={}, Env={}",
                            instance.tags.get("Owner").unwrap_or("-"),
                            instance.tags.get("Environment").unwrap_or("-"),
                        );
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::from(report::EXIT_FAILED)
                }
            },
            InstanceSubcommand::Start(args) => report::report(&guard.start_instance(&args.id).await),
            InstanceSubcommand::Stop(args) => report::report(&guard.stop_instance(&args.id).await),
        }
    }
}
