//! Tipjar Core Library
//!
//! Bill splitting and expense analytics for the Tipjar tool:
//! - Tip and split calculation
//! - Calendar-aligned list filters and trailing KPI windows
//! - Aggregation by category, amount range, and time bucket
//! - Rankings, percentage breakdowns, and trend series
//! - Keyword search with windowed pagination
//! - JSON record store, CSV export, and TOML settings

pub mod aggregate;
pub mod calendar;
pub mod category;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod reports;
pub mod search;
pub mod store;
pub mod tip;
pub mod window;

pub use calendar::Calendar;
pub use category::Category;
pub use config::Settings;
pub use error::{Error, Result};
pub use models::{
    AggregationResult, AmountRange, BreakdownRow, BucketTotal, BucketUnit, CategorySlice,
    Dashboard, ExpenseRecord, FilterOption, Period, RangeCount, RankKey,
};
pub use search::RecordBrowser;
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use tip::{Split, TipPolicy};
pub use window::TimeWindow;
