//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Tipjar - Split bills and see where the money goes
#[derive(Parser)]
#[command(name = "tipjar")]
#[command(about = "Bill splitting and expense analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Record file (JSON)
    #[arg(long, default_value = "tipjar.json", global = true)]
    pub data: PathBuf,

    /// Settings file (defaults to ~/.config/tipjar/tipjar.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a bill split, optionally saving it
    Split {
        /// Bill amount before tip
        #[arg(short, long)]
        bill: f64,

        /// Tip policy: 15%, custom:60, none (omit to compare presets)
        #[arg(short, long)]
        tip: Option<String>,

        /// Number of people sharing the bill
        #[arg(short, long, default_value = "1")]
        people: u32,

        /// Category id (food, transport, travel, ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Place name or address
        #[arg(long)]
        place: Option<String>,

        /// Save the split as a record
        #[arg(long)]
        save: bool,
    },

    /// List records
    List {
        /// Filter: newest, today, this-week, this-month, this-year, most-expensive, cheapest, oldest
        #[arg(short, long, default_value = "newest")]
        filter: String,

        /// Maximum records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Search records by amount or place
    Search {
        /// Amount (e.g. 42.5) or text to match against the place
        keyword: String,
    },

    /// Show KPIs for today, the last 7 days, month, and year
    Summary,

    /// Show totals per category
    Categories,

    /// Show record counts per amount range
    Ranges,

    /// Show spending over trailing days, weeks, months, or years
    Trend {
        /// Bucket unit: day, week, month, year
        #[arg(short, long, default_value = "month")]
        unit: String,

        /// Number of buckets (defaults to the configured count for the unit)
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Show the largest records
    Top {
        /// Number of records (defaults to reports.top_n)
        #[arg(short, long)]
        n: Option<usize>,

        /// Ranking key: total, per-person, tip
        #[arg(long, default_value = "total")]
        by: String,
    },

    /// Show each category's share of total spending
    Breakdown,

    /// Export records or the category breakdown as CSV
    Export {
        /// What to export
        #[arg(long, value_enum, default_value = "records")]
        what: ExportKind,

        /// Record filter applied before export
        #[arg(short, long, default_value = "newest")]
        filter: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Records,
    Breakdown,
}
