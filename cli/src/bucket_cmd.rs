//! `platform bucket` subcommands.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use platform_guard::{BucketSpec, CloudStore, Environment, Guard, ProvisionRequest};

use crate::report;

#[derive(Debug, Parser)]
pub struct BucketCli {
    #[command(subcommand)]
    command: BucketSubcommand,
}

#[derive(Debug, Subcommand)]
enum BucketSubcommand {
    /// Create a new storage bucket.
    Create(CreateArgs),
    /// List buckets managed by this tool.
    List,
    /// Upload a file into a managed bucket.
    Upload(UploadArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Bucket name.
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

    /// Make the bucket publicly visible. Asks for confirmation.
    #[arg(long)]
    public: bool,
}

#[derive(Debug, Args)]
struct UploadArgs {
    /// Target bucket name.
    bucket: String,

    /// Local file to upload.
    file: PathBuf,

    /// Object key; defaults to the file name.
    #[arg(long)]
    key: Option<String>,
}

impl BucketCli {
    pub async fn run<S: CloudStore>(&self, guard: &Guard<'_, S>) -> ExitCode {
        match &self.command {
            BucketSubcommand::Create(args) => {
                // The guard never prompts; the confirmation happens here and
                // only the resulting flag is passed down.
                let confirmed = args.public && confirm_public(&args.name);
                let req = ProvisionRequest {
                    owner: args.owner.clone(),
                    project: args.project.clone(),
                    environment: args.environment,
                };
                let spec = BucketSpec {
                    name: args.name.clone(),
                    public: args.public,
                    confirmed,
                };
                report::report(&guard.create_bucket(&req, &spec).await)
            }
            BucketSubcommand::List => match guard.list_buckets().await {
                Ok(buckets) => {
                    if buckets.is_empty() {
                        println!("No managed buckets found.");
                    }
                    for bucket in &buckets {
                        println!(
                            "- {} ({}), Owner={}, Env={}",
                            bucket.name,
                            if bucket.public { "public" } else { "private" },
                            bucket.tags.get("Owner").unwrap_or("-"),
                            bucket.tags.get("Environment").unwrap_or("-"),
                        );
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::from(report::EXIT_FAILED)
                }
            },
            BucketSubcommand::Upload(args) => {
                let key = match &args.key {
                    Some(key) => key.clone(),
                    None => match file_name(&args.file) {
                        Some(name) => name,
                        None => {
                            eprintln!(
                                "Error: cannot derive an object key from {}",
                                args.file.display()
                            );
                            return ExitCode::from(report::EXIT_FAILED);
                        }
                    },
                };
                let body = match read_payload(&args.file) {
                    Ok(body) => body,
                    Err(err) => {
                        eprintln!("Error: {err:#}");
                        return ExitCode::from(report::EXIT_FAILED);
                    }
                };
                report::report(&guard.upload_object(&args.bucket, &key, body).await)
            }
        }
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn read_payload(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Interactive y/N prompt for public-bucket creation. Anything other than an
/// explicit yes counts as a decline.
fn confirm_public(name: &str) -> bool {
    print!("Bucket {name} will be PUBLICLY visible. Proceed? [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    let stdin = std::io::stdin();
    if stdin.lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
