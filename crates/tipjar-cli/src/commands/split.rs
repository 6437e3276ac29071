//! Bill split command

use anyhow::{Context, Result};
use tipjar_core::{Category, Split, TipPolicy};

use super::core::Session;
use super::{money, print_json};

pub fn cmd_split(
    session: &Session,
    bill: f64,
    tip: Option<&str>,
    people: u32,
    category: Option<&str>,
    place: Option<&str>,
    save: bool,
) -> Result<()> {
    let category = category
        .map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
        .transpose()?;

    let policy = match tip {
        Some(label) => TipPolicy::parse(label).context("Invalid --tip")?,
        None => TipPolicy::None,
    };

    let split = Split::calculate(bill, policy, people).context("Cannot split bill")?;

    if save {
        let mut record = split.clone().into_record(session.now, category);
        if let Some(place) = place {
            record = record.with_location_name(place);
        }
        let stored = session
            .store
            .append(record)
            .with_context(|| format!("Failed to save to {}", session.store.path().display()))?;

        if session.json {
            return print_json(&stored);
        }

        print_split(&split);
        println!();
        println!(
            "✅ Saved {} ({})",
            stored.id.as_deref().unwrap_or("record"),
            stored.category().label()
        );
        return Ok(());
    }

    if session.json {
        return print_json(&split);
    }

    print_split(&split);

    if tip.is_none() {
        print_presets(session, bill, people)?;
    }

    Ok(())
}

fn print_split(split: &Split) {
    let tip_label = if split.tip_label.is_empty() {
        "no tip".to_string()
    } else {
        split.tip_label.clone()
    };

    println!();
    println!("🧮 Bill Split");
    println!("   ─────────────────────────────");
    println!("   Bill:        {:>12}", money(split.bill_amount));
    println!("   Tip:         {:>12}  ({})", money(split.tip_amount), tip_label);
    println!("   Total:       {:>12}", money(split.total_amount));
    println!(
        "   Per person:  {:>12}  ({} {})",
        money(split.amount_per_person),
        split.split_count,
        if split.split_count == 1 { "person" } else { "people" }
    );
}

/// Compare the configured quick-pick tips for the same bill
fn print_presets(session: &Session, bill: f64, people: u32) -> Result<()> {
    let presets = session.settings.tip_presets();
    if presets.is_empty() {
        return Ok(());
    }

    println!();
    println!("   {:>6} │ {:>10} │ {:>10} │ {:>10}", "Tip", "Tip amt", "Total", "Each");
    println!("   ───────┼────────────┼────────────┼───────────");
    for policy in presets {
        let split = Split::calculate(bill, policy, people)?;
        println!(
            "   {:>6} │ {:>10} │ {:>10} │ {:>10}",
            split.tip_label,
            money(split.tip_amount),
            money(split.total_amount),
            money(split.amount_per_person)
        );
    }

    Ok(())
}
