use anyhow::{Context, Result};
use canasta::basket::Basket;
use canasta::cache::{BasketStore, FileStore};
use canasta::cli::{Cli, OutputFormat};
use canasta::csv_output::CsvReport;
use canasta::ingest::{self, ValueFilter};
use canasta::json_output::JsonReport;
use canasta::text_output::TextReport;
use canasta::{miner, rules};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the worker thread count (0 = auto-detect)
fn resolve_threads(requested: usize) -> usize {
    if requested == 0 {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
    } else {
        requested
    }
}

/// Build baskets from the input CSV according to the CLI options
fn ingest_baskets(args: &Cli) -> Result<Vec<Basket>> {
    let input = args.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("Must supply an INPUT file (or a --cache file that exists)")
    })?;
    let filter = ValueFilter::new(&args.skip_values, args.skip_pattern.as_deref())?;
    ingest::read_baskets(input, args.columns.as_deref(), &filter)
}

/// Load baskets from the cache when possible, otherwise ingest and cache
fn load_or_build_baskets(args: &Cli) -> Result<Vec<Basket>> {
    let Some(cache_path) = &args.cache else {
        return ingest_baskets(args);
    };
    let store = FileStore::new(cache_path);
    if let Some(baskets) = store
        .load()
        .with_context(|| format!("cannot load basket cache {}", cache_path.display()))?
    {
        return Ok(baskets);
    }
    let baskets = ingest_baskets(args)?;
    store
        .save(&baskets)
        .with_context(|| format!("cannot write basket cache {}", cache_path.display()))?;
    Ok(baskets)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    // Both thresholds are checked before any work so an invalid run
    // produces no partial output
    miner::validate_ratio("min-support", args.min_support)?;
    miner::validate_ratio("min-confidence", args.min_confidence)?;

    let baskets = load_or_build_baskets(&args)?;
    let threads = resolve_threads(args.threads);

    let frequent = miner::mine(&baskets, args.min_support, threads)?;
    let derived = rules::derive_rules(&frequent, args.min_confidence)?;

    let report = match args.format {
        OutputFormat::Text => {
            TextReport::new(args.min_support, args.min_confidence).render(&frequent, &derived)
        }
        OutputFormat::Json => {
            JsonReport::new(args.min_support, args.min_confidence, &frequent, &derived)
                .to_json_pretty()?
        }
        OutputFormat::Csv => CsvReport::new().render(&frequent, &derived),
    };

    match &args.output {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("cannot write report to {}", path.display()))?,
        None => print!("{}", report),
    }
    Ok(())
}
