//! CSV export for record lists and category breakdowns
//!
//! Amounts are written with two decimals and percentages as fractions with
//! four, so spreadsheets can apply their own formatting.

use std::io::Write;

use csv::Writer;
use tracing::debug;

use crate::error::Result;
use crate::models::{BreakdownRow, ExpenseRecord};

/// Write records as CSV, one row per record, in the given order
pub fn write_records_csv<W: Write>(writer: W, records: &[ExpenseRecord]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record([
        "id",
        "created_at",
        "category",
        "bill",
        "tip",
        "total",
        "split",
        "per_person",
        "tip_label",
        "location",
    ])?;

    for record in records {
        let created_at = record
            .created_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        wtr.write_record([
            record.id.as_deref().unwrap_or(""),
            &created_at,
            record.category().as_str(),
            &format!("{:.2}", record.bill_amount),
            &format!("{:.2}", record.tip_amount),
            &format!("{:.2}", record.total_amount),
            &record.split_count.to_string(),
            &format!("{:.2}", record.amount_per_person),
            &record.tip_label,
            record.location_text().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    debug!(rows = records.len(), "Exported records CSV");
    Ok(())
}

/// Write breakdown rows as CSV
pub fn write_breakdown_csv<W: Write>(writer: W, rows: &[BreakdownRow]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(["category", "label", "amount", "percent_of_total"])?;
    for row in rows {
        wtr.write_record([
            row.category.as_str(),
            &row.label,
            &format!("{:.2}", row.amount),
            &format!("{:.4}", row.percent_of_total),
        ])?;
    }

    wtr.flush()?;
    debug!(rows = rows.len(), "Exported breakdown CSV");
    Ok(())
}
