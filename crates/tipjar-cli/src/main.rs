//! Tipjar CLI - Bill splitting and expense analytics
//!
//! Usage:
//!   tipjar split --bill 120 --tip 15% --people 3 --save
//!   tipjar list --filter this-week
//!   tipjar summary
//!   tipjar trend --unit week --count 8

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json and CSV output on stdout stay parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let session = commands::open_session(&cli.data, cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Split {
            bill,
            tip,
            people,
            category,
            place,
            save,
        } => commands::cmd_split(
            &session,
            bill,
            tip.as_deref(),
            people,
            category.as_deref(),
            place.as_deref(),
            save,
        ),
        Commands::List { filter, limit } => commands::cmd_list(&session, &filter, limit),
        Commands::Search { keyword } => commands::cmd_search(&session, &keyword),
        Commands::Summary => commands::cmd_summary(&session),
        Commands::Categories => commands::cmd_categories(&session),
        Commands::Ranges => commands::cmd_ranges(&session),
        Commands::Trend { unit, count } => commands::cmd_trend(&session, &unit, count),
        Commands::Top { n, by } => commands::cmd_top(&session, n, &by),
        Commands::Breakdown => commands::cmd_breakdown(&session),
        Commands::Export { what, filter, out } => {
            commands::cmd_export(&session, what, &filter, out.as_deref())
        }
    }
}
