//! Record list and search commands

use anyhow::Result;
use tipjar_core::{filter, ExpenseRecord, FilterOption};

use super::core::Session;
use super::{money, print_json, truncate};

pub fn cmd_list(session: &Session, filter: &str, limit: usize) -> Result<()> {
    let option: FilterOption = filter.parse().map_err(anyhow::Error::msg)?;
    let records = session.records()?;

    let selected = filter::apply(option, &records, session.now, &session.calendar);
    let shown = &selected[..limit.min(selected.len())];

    if session.json {
        return print_json(shown);
    }

    println!();
    println!(
        "📋 Records: {} ({} of {})",
        option,
        shown.len(),
        selected.len()
    );
    print_records(session, shown);

    Ok(())
}

pub fn cmd_search(session: &Session, keyword: &str) -> Result<()> {
    let records = session.records()?;
    let mut browser = session.settings.browser(records);
    let results = browser.filter(keyword).to_vec();

    if session.json {
        return print_json(&results);
    }

    println!();
    match browser.keyword() {
        Some(keyword) => println!("🔍 Search \"{}\": {} found", keyword, results.len()),
        None => println!(
            "🔍 First {} of {} records",
            results.len(),
            browser.total()
        ),
    }
    print_records(session, &results);

    Ok(())
}

/// Print a record table
pub fn print_records(session: &Session, records: &[ExpenseRecord]) {
    println!("   ─────────────────────────────────────────────────────────────────────────────");

    if records.is_empty() {
        println!("   No records found.");
        return;
    }

    println!(
        "   {:16} │ {:4} │ {:>10} │ {:>5} │ {:>10} │ {}",
        "Date", "Cat", "Total", "Split", "Each", "Place"
    );
    println!("   ─────────────────┼──────┼────────────┼───────┼────────────┼─────────────────────");

    for record in records {
        let date = record
            .created_at
            .map(|t| session.calendar.local(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "   {:16} │ {:4} │ {:>10} │ {:>5} │ {:>10} │ {}",
            date,
            record.category().label(),
            money(record.total_amount),
            record.split_count,
            money(record.amount_per_person),
            truncate(record.location_text().unwrap_or(""), 24)
        );
    }
}
