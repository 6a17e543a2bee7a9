//! CLI argument parsing for Canasta

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for mining reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "canasta")]
#[command(version)]
#[command(about = "Frequent itemset miner and association rule engine", long_about = None)]
pub struct Cli {
    /// CSV input file of records (may be omitted when --cache hits)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Minimum support ratio in (0, 1]
    #[arg(short = 's', long = "min-support", value_name = "RATIO")]
    pub min_support: f64,

    /// Minimum confidence ratio in (0, 1]
    #[arg(short = 'c', long = "min-confidence", value_name = "RATIO")]
    pub min_confidence: f64,

    /// Columns to tokenize into basket items (comma-separated; default: every header column)
    #[arg(long = "columns", value_name = "COLS", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Exact cell values to ignore when building baskets
    #[arg(
        long = "skip-value",
        value_name = "VALUE",
        default_values_t = vec!["UNKNOWN".to_string()]
    )]
    pub skip_values: Vec<String>,

    /// Regex of cell values to ignore when building baskets
    #[arg(long = "skip-pattern", value_name = "REGEX")]
    pub skip_pattern: Option<String>,

    /// Basket cache file; loaded if present, written after ingest otherwise
    #[arg(long = "cache", value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Output format (text, json, or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worker threads for support counting (0 = auto-detect)
    #[arg(long = "threads", value_name = "N", default_value = "1")]
    pub threads: usize,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
