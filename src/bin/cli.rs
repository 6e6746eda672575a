use clap::Parser;
use cuckoo_rs::{CuckooFilterConfigBuilder, common::bytes2hr, process_file};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Run a command file of `add`/`check` records against per-user cuckoo filters
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command file: `<label> <expectedItemCount>` followed by
    /// `<op> <user> <item>` records
    input: PathBuf,

    /// File the answers are written to
    output: PathBuf,

    /// Seed for eviction choices, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum evictions per insertion
    #[arg(long, default_value = "500")]
    max_kicks: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let template = match CuckooFilterConfigBuilder::default()
        .max_kicks(cli.max_kicks)
        .seed(cli.seed)
        .build()
    {
        Ok(template) => template,
        Err(e) => {
            error!("Failed to build filter config: {e}");
            return ExitCode::FAILURE;
        }
    };

    match process_file(&cli.input, &cli.output, template) {
        Ok(report) => {
            info!(
                records = report.responses.len(),
                users = report.users,
                exhausted = report.exhausted,
                memory = %bytes2hr(report.memory_bytes),
                output = %cli.output.display(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(input = %cli.input.display(), "{e}");
            ExitCode::FAILURE
        }
    }
}
