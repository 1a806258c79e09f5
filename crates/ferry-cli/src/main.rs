//! Ferry - flywheel marketplace → opencode converter
//!
//! Usage:
//!   ferry                          # sync local-marketplace/flywheel into ~/.config/opencode
//!   ferry --dry-run                # print planned actions, touch nothing
//!   ferry --source X --output Y    # explicit roots

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ferry_core::deploy::{SyncOptions, SyncReport, sync_tree};

#[derive(Parser)]
#[command(name = "ferry")]
#[command(about = "Convert flywheel marketplace plugins to the opencode layout", long_about = None)]
struct Cli {
    /// Root of the marketplace plugin tree
    #[arg(long, default_value = "local-marketplace/flywheel")]
    source: PathBuf,

    /// Root of the opencode configuration tree
    ///
    /// Defaults to the per-user opencode configuration directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print planned actions without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Output format for the run summary
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable summary line
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing; diagnostics go to stderr so stdout stays clean
    // for the plan and summary output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.output {
        Some(path) => path,
        None => default_output_dir()?,
    };

    let options = SyncOptions {
        source: cli.source,
        output,
        dry_run: cli.dry_run,
    };
    debug!(
        source = %options.source.display(),
        output = %options.output.display(),
        dry_run = options.dry_run,
        "starting sync"
    );

    let report = sync_tree(&options)?;
    render(&report, options.dry_run, cli.format)?;

    Ok(())
}

fn default_output_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("opencode"))
        .ok_or_else(|| anyhow::anyhow!("Could not determine the user home directory"))
}

fn render(report: &SyncReport, dry_run: bool, format: OutputFormat) -> Result<()> {
    if dry_run {
        for entry in &report.plan {
            println!(
                "{} -> {} [{}]",
                entry.source_rel.display(),
                entry.dest_rel.display(),
                entry.action
            );
        }
    }

    match format {
        OutputFormat::Table => println!("{}", report.counts),
        OutputFormat::Json => println!("{}", serde_json::to_string(&report.counts)?),
    }

    Ok(())
}
