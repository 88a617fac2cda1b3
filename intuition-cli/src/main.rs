#![deny(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod output;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "intuition",
    about = "Score an intuition profile",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace).  RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Score a JSON profile file.
    Compute(ComputeArgs),

    /// List the sub-metric catalogue, or print a generation config template.
    Metrics(MetricsArgs),
}

#[derive(Args)]
struct ComputeArgs {
    /// JSON profile to score.
    path: PathBuf,

    /// Output format: pretty, text, or json.
    #[arg(long, default_value = "pretty")]
    format: String,

    /// Built-in generation: classic or revised.
    #[arg(long, default_value = "classic", conflicts_with = "config")]
    generation: String,

    /// TOML file with a `[generation]` table.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct MetricsArgs {
    /// Output format: table or toml.
    #[arg(long, default_value = "table")]
    format: String,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compute(a) => commands::compute::run(
            &a.path,
            &a.format,
            &a.generation,
            a.config.as_deref(),
        ),

        Command::Metrics(a) => commands::metrics::run(&a.format),
    }
}
