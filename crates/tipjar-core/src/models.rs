//! Domain models for Tipjar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::window::TimeWindow;

/// Absolute tolerance for amount comparisons
pub const AMOUNT_EPSILON: f64 = 1e-4;

/// A recorded bill split
///
/// Owned by the storage collaborator; the analytics in this crate only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// None until the store saves the record
    #[serde(default)]
    pub id: Option<String>,
    /// Records without a timestamp are skipped by every time-based view
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Amount before tip
    pub bill_amount: f64,
    /// Resolved tip amount (absolute, not a percentage)
    pub tip_amount: f64,
    /// bill + tip; authoritative for sorting and bucketing
    pub total_amount: f64,
    pub amount_per_person: f64,
    pub split_count: u32,
    /// Tip policy description ("10%", "custom:60", or empty for none)
    #[serde(default)]
    pub tip_label: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ExpenseRecord {
    /// Build an unsaved, undated record from a bill, a tip, and a head count.
    ///
    /// A zero split count is treated as one person.
    pub fn from_amounts(bill_amount: f64, tip_amount: f64, split_count: u32) -> Self {
        let split_count = split_count.max(1);
        let total_amount = bill_amount + tip_amount;
        Self {
            id: None,
            created_at: None,
            bill_amount,
            tip_amount,
            total_amount,
            amount_per_person: total_amount / split_count as f64,
            split_count,
            tip_label: String::new(),
            category_id: None,
            address: None,
            location_name: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category_id = Some(category.as_str().to_string());
        self
    }

    pub fn with_tip_label(mut self, label: impl Into<String>) -> Self {
        self.tip_label = label.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_location_name(mut self, name: impl Into<String>) -> Self {
        self.location_name = Some(name.into());
        self
    }

    /// Resolved category (unknown ids map to `Category::Unknown`)
    pub fn category(&self) -> Category {
        Category::resolve(self.category_id.as_deref())
    }

    /// Whether `total_amount` agrees with `bill_amount + tip_amount`
    pub fn is_consistent(&self) -> bool {
        (self.total_amount - (self.bill_amount + self.tip_amount)).abs() <= AMOUNT_EPSILON
    }

    /// Text searched by keyword filters: the address, or the place name when
    /// no address was geocoded
    pub fn location_text(&self) -> Option<&str> {
        self.address
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or(self.location_name.as_deref())
    }
}

// ========== Filter Models ==========

/// List filter/sort policy. Exactly one is active per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOption {
    Newest,
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    MostExpensive,
    Cheapest,
    Oldest,
}

impl FilterOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Today => "today",
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::ThisYear => "this-year",
            Self::MostExpensive => "most-expensive",
            Self::Cheapest => "cheapest",
            Self::Oldest => "oldest",
        }
    }

    /// All options in picker order
    pub fn all() -> &'static [FilterOption] {
        &[
            Self::Newest,
            Self::Today,
            Self::ThisWeek,
            Self::ThisMonth,
            Self::ThisYear,
            Self::MostExpensive,
            Self::Cheapest,
            Self::Oldest,
        ]
    }

    /// Options that restrict records to the current calendar period
    pub fn is_time_scoped(&self) -> bool {
        matches!(
            self,
            Self::Today | Self::ThisWeek | Self::ThisMonth | Self::ThisYear
        )
    }
}

impl Default for FilterOption {
    fn default() -> Self {
        Self::Newest
    }
}

impl std::str::FromStr for FilterOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "newest" => Ok(Self::Newest),
            "today" => Ok(Self::Today),
            "this-week" | "thisweek" | "week" => Ok(Self::ThisWeek),
            "this-month" | "thismonth" | "month" => Ok(Self::ThisMonth),
            "this-year" | "thisyear" | "year" => Ok(Self::ThisYear),
            "most-expensive" | "mostexpensive" => Ok(Self::MostExpensive),
            "cheapest" => Ok(Self::Cheapest),
            "oldest" => Ok(Self::Oldest),
            _ => Err(format!(
                "Unknown filter: {} (valid: newest, today, this-week, this-month, this-year, most-expensive, cheapest, oldest)",
                s
            )),
        }
    }
}

impl std::fmt::Display for FilterOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Report Models ==========

/// Relative period for KPI windows (trailing, ending at "now")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Today,
    #[serde(rename = "last-7-days")]
    Last7Days,
    LastMonth,
    LastYear,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last7Days => "last-7-days",
            Self::LastMonth => "last-month",
            Self::LastYear => "last-year",
        }
    }

    pub fn all() -> &'static [Period] {
        &[Self::Today, Self::Last7Days, Self::LastMonth, Self::LastYear]
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "day" => Ok(Self::Today),
            "last-7-days" | "week" => Ok(Self::Last7Days),
            "last-month" | "month" => Ok(Self::LastMonth),
            "last-year" | "year" => Ok(Self::LastYear),
            _ => Err(format!(
                "Unknown period: {} (valid: today, last-7-days, last-month, last-year)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend chart bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    Day,
    Week,
    Month,
    Year,
}

impl BucketUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::str::FromStr for BucketUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            _ => Err(format!(
                "Unknown bucket unit: {} (valid: day, week, month, year)",
                s
            )),
        }
    }
}

impl std::fmt::Display for BucketUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scalar summary of a record set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregationResult {
    pub count: usize,
    pub total_amount: f64,
    /// 0 when count is 0
    pub average_per_record: f64,
    /// 0 when count is 0
    pub average_tip: f64,
}

/// Spending total for one category (chart series entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: Category,
    pub label: String,
    pub total_amount: f64,
}

/// Fixed total-amount ranges, ascending and half-open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountRange {
    Under500,
    From500To1K,
    From1KTo2K,
    From2KTo5K,
    Over5K,
}

impl AmountRange {
    pub fn all() -> &'static [AmountRange] {
        &[
            Self::Under500,
            Self::From500To1K,
            Self::From1KTo2K,
            Self::From2KTo5K,
            Self::Over5K,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Under500 => "0-500",
            Self::From500To1K => "500-1K",
            Self::From1KTo2K => "1K-2K",
            Self::From2KTo5K => "2K-5K",
            Self::Over5K => "5K+",
        }
    }

    /// Exclusive upper bound, None for the open-ended top range
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            Self::Under500 => Some(500.0),
            Self::From500To1K => Some(1000.0),
            Self::From1KTo2K => Some(2000.0),
            Self::From2KTo5K => Some(5000.0),
            Self::Over5K => None,
        }
    }

    /// First range (ascending) whose upper bound exceeds the amount
    pub fn for_amount(amount: f64) -> AmountRange {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.upper_bound().map_or(true, |upper| amount < upper))
            .unwrap_or(Self::Over5K)
    }
}

/// Record count for one amount range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCount {
    pub range: AmountRange,
    pub label: String,
    pub count: usize,
}

/// Spending total for one time bucket (trend chart point)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTotal {
    pub label: String,
    pub window: TimeWindow,
    pub total_amount: f64,
    pub count: usize,
}

/// Category row for the breakdown list, ranked by share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub category: Category,
    pub label: String,
    pub amount: f64,
    /// Fraction of the total in [0, 1]
    pub percent_of_total: f64,
}

/// Ranking key for top-N lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankKey {
    #[serde(rename = "total")]
    TotalAmount,
    #[serde(rename = "per-person")]
    AmountPerPerson,
    #[serde(rename = "tip")]
    TipAmount,
}

impl RankKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalAmount => "total",
            Self::AmountPerPerson => "per-person",
            Self::TipAmount => "tip",
        }
    }

    pub fn value(&self, record: &ExpenseRecord) -> f64 {
        match self {
            Self::TotalAmount => record.total_amount,
            Self::AmountPerPerson => record.amount_per_person,
            Self::TipAmount => record.tip_amount,
        }
    }
}

impl Default for RankKey {
    fn default() -> Self {
        Self::TotalAmount
    }
}

impl std::str::FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total" | "total-amount" => Ok(Self::TotalAmount),
            "per-person" | "person" => Ok(Self::AmountPerPerson),
            "tip" => Ok(Self::TipAmount),
            _ => Err(format!(
                "Unknown ranking: {} (valid: total, per-person, tip)",
                s
            )),
        }
    }
}

/// KPI panel: one summary per trailing period plus all time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: AggregationResult,
    pub last_7_days: AggregationResult,
    pub last_month: AggregationResult,
    pub last_year: AggregationResult,
    pub all_time: AggregationResult,
}

impl Dashboard {
    pub fn for_period(&self, period: Period) -> &AggregationResult {
        match period {
            Period::Today => &self.today,
            Period::Last7Days => &self.last_7_days,
            Period::LastMonth => &self.last_month,
            Period::LastYear => &self.last_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amounts_derives_totals() {
        let r = ExpenseRecord::from_amounts(90.0, 10.0, 4);
        assert_eq!(r.total_amount, 100.0);
        assert_eq!(r.amount_per_person, 25.0);
        assert!(r.is_consistent());
        assert!(r.id.is_none());
        assert!(r.created_at.is_none());
    }

    #[test]
    fn test_from_amounts_zero_split_is_one_person() {
        let r = ExpenseRecord::from_amounts(50.0, 0.0, 0);
        assert_eq!(r.split_count, 1);
        assert_eq!(r.amount_per_person, 50.0);
    }

    #[test]
    fn test_inconsistent_total_detected() {
        let mut r = ExpenseRecord::from_amounts(90.0, 10.0, 1);
        r.total_amount = 120.0;
        assert!(!r.is_consistent());
    }

    #[test]
    fn test_record_deserializes_camel_case_with_missing_optionals() {
        let json = r#"{
            "billAmount": 100.0,
            "tipAmount": 10.0,
            "totalAmount": 110.0,
            "amountPerPerson": 55.0,
            "splitCount": 2,
            "categoryId": "food"
        }"#;
        let r: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.split_count, 2);
        assert_eq!(r.category(), Category::Food);
        assert!(r.created_at.is_none());
        assert_eq!(r.tip_label, "");
    }

    #[test]
    fn test_location_text_prefers_address() {
        let r = ExpenseRecord::from_amounts(1.0, 0.0, 1)
            .with_address("12 Main St")
            .with_location_name("Cafe");
        assert_eq!(r.location_text(), Some("12 Main St"));

        let r = ExpenseRecord::from_amounts(1.0, 0.0, 1).with_location_name("Cafe");
        assert_eq!(r.location_text(), Some("Cafe"));

        let r = ExpenseRecord::from_amounts(1.0, 0.0, 1);
        assert_eq!(r.location_text(), None);
    }

    #[test]
    fn test_filter_option_parse_and_display() {
        for option in FilterOption::all() {
            let parsed: FilterOption = option.as_str().parse().unwrap();
            assert_eq!(parsed, *option);
        }
        assert_eq!("thisWeek".parse::<FilterOption>().unwrap(), FilterOption::ThisWeek);
        assert_eq!("MOST_EXPENSIVE".parse::<FilterOption>().unwrap(), FilterOption::MostExpensive);
        assert!("cheapest-first".parse::<FilterOption>().is_err());
        assert_eq!(FilterOption::default(), FilterOption::Newest);
    }

    #[test]
    fn test_enum_json_names_match_display() {
        for option in FilterOption::all() {
            let json = serde_json::to_string(option).unwrap();
            assert_eq!(json, format!("\"{}\"", option));
            assert_eq!(serde_json::from_str::<FilterOption>(&json).unwrap(), *option);
        }
        for period in Period::all() {
            let json = serde_json::to_string(period).unwrap();
            assert_eq!(json, format!("\"{}\"", period));
        }
        assert_eq!(serde_json::to_string(&FilterOption::ThisWeek).unwrap(), "\"this-week\"");
        assert_eq!(serde_json::to_string(&Period::Last7Days).unwrap(), "\"last-7-days\"");
        assert_eq!(serde_json::to_string(&RankKey::AmountPerPerson).unwrap(), "\"per-person\"");
    }

    #[test]
    fn test_time_scoped_options() {
        let scoped: Vec<_> = FilterOption::all()
            .iter()
            .filter(|o| o.is_time_scoped())
            .collect();
        assert_eq!(scoped.len(), 4);
        assert!(!FilterOption::Newest.is_time_scoped());
        assert!(!FilterOption::Cheapest.is_time_scoped());
    }

    #[test]
    fn test_amount_range_boundaries() {
        assert_eq!(AmountRange::for_amount(0.0), AmountRange::Under500);
        assert_eq!(AmountRange::for_amount(499.99), AmountRange::Under500);
        assert_eq!(AmountRange::for_amount(500.0), AmountRange::From500To1K);
        assert_eq!(AmountRange::for_amount(1000.0), AmountRange::From1KTo2K);
        assert_eq!(AmountRange::for_amount(1999.0), AmountRange::From1KTo2K);
        assert_eq!(AmountRange::for_amount(2000.0), AmountRange::From2KTo5K);
        assert_eq!(AmountRange::for_amount(5000.0), AmountRange::Over5K);
        assert_eq!(AmountRange::for_amount(1e9), AmountRange::Over5K);
    }

    #[test]
    fn test_rank_key_values() {
        let r = ExpenseRecord::from_amounts(80.0, 20.0, 4);
        assert_eq!(RankKey::TotalAmount.value(&r), 100.0);
        assert_eq!(RankKey::AmountPerPerson.value(&r), 25.0);
        assert_eq!(RankKey::TipAmount.value(&r), 20.0);
        assert_eq!("per-person".parse::<RankKey>().unwrap(), RankKey::AmountPerPerson);
    }
}
