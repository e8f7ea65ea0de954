//! topk-hui CLI - mine the top-K high-utility itemsets of a dataset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use topk_hui::{load_dataset, render, MinerConfig, OutputFormat, TopKMiner, DEFAULT_K, DEFAULT_MAX_WIDTH};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "topk-hui")]
#[command(version)]
#[command(about = "Mine the top-K high-utility itemsets of a transaction dataset")]
struct Cli {
    /// Dataset in `<items>:<total>:<utilities>` format
    input: PathBuf,

    /// Number of itemsets to report (negative reports none)
    #[arg(short, long, default_value_t = DEFAULT_K as i64, allow_negative_numbers = true)]
    k: i64,

    /// Widest transaction accepted before the run is refused
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    max_width: usize,

    /// Fold transactions in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Spmf,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Spmf => OutputFormat::Spmf,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let store = load_dataset(&cli.input)
        .with_context(|| format!("Failed to load dataset {}", cli.input.display()))?;
    info!(transactions = store.len(), items = store.item_count(), "dataset ready");

    let config = MinerConfig::default()
        .with_signed_k(cli.k)
        .with_max_width(cli.max_width)
        .with_parallel(cli.parallel);
    let result = TopKMiner::new(config).mine(&store).context("Mining failed")?;

    let rendered = render(&result, store.vocabulary(), cli.format.into())?;
    match cli.output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}
