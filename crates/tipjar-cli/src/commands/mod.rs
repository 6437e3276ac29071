//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared session setup (settings, record store, clock)
//! - `split` - Tip and bill split calculation
//! - `records` - Record listing and search
//! - `reports` - KPI, category, range, trend, and ranking reports
//! - `export` - CSV export

pub mod core;
pub mod export;
pub mod records;
pub mod reports;
pub mod split;

// Re-export command functions for main.rs
pub use self::core::*;
pub use export::*;
pub use records::*;
pub use reports::*;
pub use split::*;

use anyhow::Result;
use serde::Serialize;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount for display
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
