//! CSV export command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tipjar_core::aggregate::group_by_category;
use tipjar_core::export::{write_breakdown_csv, write_records_csv};
use tipjar_core::{filter, reports, Category, FilterOption};
use tracing::info;

use crate::cli::ExportKind;

use super::core::Session;

pub fn cmd_export(
    session: &Session,
    what: ExportKind,
    filter: &str,
    out: Option<&Path>,
) -> Result<()> {
    let option: FilterOption = filter.parse().map_err(anyhow::Error::msg)?;
    let records = session.records()?;
    let selected = filter::apply(option, &records, session.now, &session.calendar);

    let writer: Box<dyn Write> = match out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let rows = match what {
        ExportKind::Records => {
            write_records_csv(writer, &selected).context("Failed to write records CSV")?;
            selected.len()
        }
        ExportKind::Breakdown => {
            let slices = group_by_category(&selected, Category::default_order());
            let breakdown = reports::category_breakdown(&slices);
            write_breakdown_csv(writer, &breakdown).context("Failed to write breakdown CSV")?;
            breakdown.len()
        }
    };

    info!(kind = ?what, filter = option.as_str(), rows, "Exported CSV");

    if let Some(path) = out {
        println!("✅ Exported {} rows to {}", rows, path.display());
    }

    Ok(())
}
