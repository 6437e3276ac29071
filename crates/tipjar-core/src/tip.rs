//! Tip and bill-split calculation
//!
//! Resolves a tip policy against a bill and a head count, producing the
//! amounts and the `tip_label` stored on an [`ExpenseRecord`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::models::ExpenseRecord;

const CUSTOM_PREFIX: &str = "custom:";

/// How the tip is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TipPolicy {
    /// No tip
    None,
    /// Percentage of the bill (15.0 means 15%)
    Percent(f64),
    /// Fixed tip amount
    Custom(f64),
}

impl TipPolicy {
    /// Parse a stored tip label: "" or "none", "15%", "custom:60"
    pub fn parse(label: &str) -> Result<Self> {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }

        let policy = if let Some(pct) = label.strip_suffix('%') {
            Self::Percent(parse_amount(pct.trim(), label)?)
        } else if let Some(amount) = label.strip_prefix(CUSTOM_PREFIX) {
            Self::Custom(parse_amount(amount.trim(), label)?)
        } else {
            return Err(Error::InvalidInput(format!(
                "Unknown tip policy: {} (expected e.g. 15%, custom:60, none)",
                label
            )));
        };

        Ok(policy)
    }

    /// Label stored on the record; empty for no tip
    pub fn label(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Percent(pct) => format!("{}%", trim_number(*pct)),
            Self::Custom(amount) => format!("{}{}", CUSTOM_PREFIX, trim_number(*amount)),
        }
    }

    /// Absolute tip for a bill
    pub fn tip_for(&self, bill: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Percent(pct) => bill * pct / 100.0,
            Self::Custom(amount) => *amount,
        }
    }
}

impl std::str::FromStr for TipPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_amount(raw: &str, label: &str) -> Result<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Invalid tip amount in '{}'", label)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "Tip must be a non-negative number: '{}'",
            label
        )));
    }
    Ok(value)
}

/// Drop a trailing ".0" so labels read "15%" rather than "15.0%"
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A resolved bill split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub bill_amount: f64,
    pub tip_amount: f64,
    pub total_amount: f64,
    pub amount_per_person: f64,
    pub split_count: u32,
    pub tip_label: String,
}

impl Split {
    pub fn calculate(bill: f64, policy: TipPolicy, split_count: u32) -> Result<Self> {
        if !bill.is_finite() || bill < 0.0 {
            return Err(Error::InvalidInput(format!(
                "Bill must be a non-negative amount, got {}",
                bill
            )));
        }
        if split_count == 0 {
            return Err(Error::InvalidInput(
                "Split count must be at least 1".to_string(),
            ));
        }
        if let TipPolicy::Percent(v) | TipPolicy::Custom(v) = policy {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "Tip must be a non-negative number, got {}",
                    v
                )));
            }
        }

        let tip_amount = policy.tip_for(bill);
        let total_amount = bill + tip_amount;

        Ok(Self {
            bill_amount: bill,
            tip_amount,
            total_amount,
            amount_per_person: total_amount / split_count as f64,
            split_count,
            tip_label: policy.label(),
        })
    }

    /// Build an unsaved record from this split
    pub fn into_record(self, created_at: DateTime<Utc>, category: Option<Category>) -> ExpenseRecord {
        ExpenseRecord {
            id: None,
            created_at: Some(created_at),
            bill_amount: self.bill_amount,
            tip_amount: self.tip_amount,
            total_amount: self.total_amount,
            amount_per_person: self.amount_per_person,
            split_count: self.split_count,
            tip_label: self.tip_label,
            category_id: category.map(|c| c.as_str().to_string()),
            address: None,
            location_name: None,
            latitude: None,
            longitude: None,
        }
    }
}
