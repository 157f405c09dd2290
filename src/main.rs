use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use consensus_vibes::config::{AnalysisConfig, CONFIG_ENV};
use consensus_vibes::input::{example_documents, load_documents};
use consensus_vibes::orchestrator::run_analysis;

/// Consensus Vibes - where a handful of documents agree and where they don't
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Plain-text documents to compare (2-10 works best)
    files: Vec<PathBuf>,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Path to YAML tuning file (falls back to the CONSENSUS_CONFIG environment variable)
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Analyze the built-in example documents instead of files
    #[arg(long, conflicts_with = "files")]
    example: bool,

    /// Also print the Markdown report to stdout
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting consensus_vibes");

    let args = Args::parse();
    debug!("Config lookup - path={:?}, env_var={}", args.config, CONFIG_ENV);
    let cfg = AnalysisConfig::resolve(args.config.as_deref())?;

    let documents = if args.example {
        let docs = example_documents();
        info!("Using built-in example documents - count={}", docs.len());
        docs
    } else {
        load_documents(&args.files)?
    };

    let outcome = run_analysis(&documents, &cfg, &args.output_dir)?;
    if args.stdout {
        print!("{}", outcome.markdown);
    }
    info!("Report written - directory={}", outcome.run_dir.display());
    Ok(())
}
