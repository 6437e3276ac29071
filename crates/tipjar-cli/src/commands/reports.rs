//! Report command implementations

use anyhow::Result;
use tipjar_core::aggregate::{group_by_amount_range, group_by_category};
use tipjar_core::{reports, AggregationResult, BucketUnit, Category, Period, RankKey};

use super::core::Session;
use super::records::print_records;
use super::{money, print_json};

pub const BAR_WIDTH: usize = 30;

/// Proportional bar for a value against the largest value in the set
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let width = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.max(1))
}

pub fn cmd_summary(session: &Session) -> Result<()> {
    let records = session.records()?;
    let dashboard = reports::dashboard(&records, session.now, &session.calendar);

    if session.json {
        return print_json(&dashboard);
    }

    println!();
    println!("📊 Spending Summary");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:12} │ {:>5} │ {:>12} │ {:>10} │ {:>9}",
        "Period", "Count", "Total", "Average", "Avg tip"
    );
    println!("   ─────────────┼───────┼──────────────┼────────────┼──────────");

    fn print_row(name: &str, result: &AggregationResult) {
        println!(
            "   {:12} │ {:>5} │ {:>12} │ {:>10} │ {:>9}",
            name,
            result.count,
            money(result.total_amount),
            money(result.average_per_record),
            money(result.average_tip)
        );
    }

    for period in Period::all() {
        print_row(period.as_str(), dashboard.for_period(*period));
    }
    print_row("all-time", &dashboard.all_time);

    Ok(())
}

pub fn cmd_categories(session: &Session) -> Result<()> {
    let records = session.records()?;
    let slices = group_by_category(&records, Category::default_order());

    if session.json {
        return print_json(&slices);
    }

    println!();
    println!("🏷️  Spending by Category");
    println!("   ─────────────────────────────────────────────────────────────");

    if slices.is_empty() {
        println!("   No spending recorded.");
        return Ok(());
    }

    let max = slices.iter().map(|s| s.total_amount).fold(0.0, f64::max);
    for slice in &slices {
        println!(
            "   {} {:14} │ {:>12} │ {}",
            slice.label,
            slice.category.as_str(),
            money(slice.total_amount),
            bar(slice.total_amount, max)
        );
    }

    Ok(())
}

pub fn cmd_ranges(session: &Session) -> Result<()> {
    let records = session.records()?;
    let ranges = group_by_amount_range(&records);

    if session.json {
        return print_json(&ranges);
    }

    println!();
    println!("📏 Records by Amount");
    println!("   ─────────────────────────────────────────────────────────────");

    let max = ranges.iter().map(|r| r.count).max().unwrap_or(0) as f64;
    for range in &ranges {
        println!(
            "   {:>7} │ {:>5} │ {}",
            range.label,
            range.count,
            bar(range.count as f64, max)
        );
    }

    Ok(())
}

pub fn cmd_trend(session: &Session, unit: &str, count: Option<usize>) -> Result<()> {
    let unit: BucketUnit = unit.parse().map_err(anyhow::Error::msg)?;
    let count = count.unwrap_or_else(|| session.settings.trend_count(unit));

    let records = session.records()?;
    let series = reports::trend_series(&records, unit, count, session.now, &session.calendar);

    if session.json {
        return print_json(&series);
    }

    println!();
    println!("📈 Spending Trend (last {} {}s)", count, unit);
    println!("   ─────────────────────────────────────────────────────────────");

    if series.len() < count {
        println!("   ⚠️  {} bucket(s) fell outside the supported date range", count - series.len());
    }

    let max = series.iter().map(|p| p.total_amount).fold(0.0, f64::max);
    for point in &series {
        println!(
            "   {:>7} │ {:>12} │ {:>4} │ {}",
            point.label,
            money(point.total_amount),
            point.count,
            bar(point.total_amount, max)
        );
    }

    Ok(())
}

pub fn cmd_top(session: &Session, n: Option<usize>, by: &str) -> Result<()> {
    let key: RankKey = by.parse().map_err(anyhow::Error::msg)?;
    let n = n.unwrap_or(session.settings.reports.top_n);

    let records = session.records()?;
    let top = reports::top_n(&records, n, key);

    if session.json {
        return print_json(&top);
    }

    println!();
    println!("🏆 Top {} by {}", n, key.as_str());
    print_records(session, &top);

    Ok(())
}

pub fn cmd_breakdown(session: &Session) -> Result<()> {
    let records = session.records()?;
    let slices = group_by_category(&records, Category::default_order());
    let rows = reports::category_breakdown(&slices);

    if session.json {
        return print_json(&rows);
    }

    println!();
    println!("🥧 Category Breakdown");
    println!("   ─────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        println!("   No spending recorded.");
        return Ok(());
    }

    println!("   {:16} │ {:>12} │ {:>6}", "Category", "Amount", "%");
    println!("   ─────────────────┼──────────────┼───────");
    for row in &rows {
        println!(
            "   {} {:14} │ {:>12} │ {:>5.1}%",
            row.label,
            row.category.as_str(),
            money(row.amount),
            row.percent_of_total * 100.0
        );
    }

    Ok(())
}
