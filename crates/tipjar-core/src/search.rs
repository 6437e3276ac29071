//! Keyword search and windowed pagination over a pre-loaded record list

use tracing::debug;

use crate::models::{ExpenseRecord, AMOUNT_EPSILON};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PREFETCH_THRESHOLD: usize = 3;

/// Browses a fixed snapshot of records.
///
/// With no keyword the list is exposed page by page through
/// [`RecordBrowser::load_more`]. A keyword replaces the view with every
/// matching record and disables paging until it is cleared.
#[derive(Debug, Clone)]
pub struct RecordBrowser {
    items: Vec<ExpenseRecord>,
    page_size: usize,
    prefetch_threshold: usize,
    keyword: Option<String>,
    loaded: usize,
    matches: Vec<ExpenseRecord>,
}

impl RecordBrowser {
    /// A zero page size is treated as one.
    pub fn new(items: Vec<ExpenseRecord>, page_size: usize, prefetch_threshold: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            prefetch_threshold,
            keyword: None,
            loaded: 0,
            matches: Vec::new(),
        }
    }

    pub fn with_defaults(items: Vec<ExpenseRecord>) -> Self {
        Self::new(items, DEFAULT_PAGE_SIZE, DEFAULT_PREFETCH_THRESHOLD)
    }

    /// Apply a search keyword and return the resulting view.
    ///
    /// A blank keyword clears the search and resets paging to the first page.
    /// A numeric keyword matches bill, total, or per-person amounts; anything
    /// else is a case-insensitive substring match on the location text.
    pub fn filter(&mut self, keyword: &str) -> &[ExpenseRecord] {
        let keyword = keyword.trim();

        if keyword.is_empty() {
            self.keyword = None;
            self.matches.clear();
            self.loaded = self.page_size.min(self.items.len());
            return &self.items[..self.loaded];
        }

        self.matches = match parse_amount(keyword) {
            Some(amount) => self
                .items
                .iter()
                .filter(|r| matches_amount(r, amount))
                .cloned()
                .collect(),
            None => {
                let needle = keyword.to_lowercase();
                self.items
                    .iter()
                    .filter(|r| {
                        r.location_text()
                            .is_some_and(|text| text.to_lowercase().contains(&needle))
                    })
                    .cloned()
                    .collect()
            }
        };
        self.keyword = Some(keyword.to_string());

        debug!(keyword, matches = self.matches.len(), "Filtered records");
        &self.matches
    }

    /// Load the next page once the viewer is near the end of the list.
    ///
    /// Returns only the newly exposed records, or nothing when a keyword is
    /// active, `current_index` is not yet within the prefetch threshold, or
    /// everything is already loaded.
    pub fn load_more(&mut self, current_index: usize) -> &[ExpenseRecord] {
        let total = self.items.len();
        let near_end = current_index >= self.loaded.saturating_sub(self.prefetch_threshold);

        if self.keyword.is_some() || !near_end || self.loaded >= total {
            return &[];
        }

        let start = self.loaded;
        self.loaded = (start + self.page_size).min(total);
        debug!(from = start, to = self.loaded, total, "Loaded next page");

        &self.items[start..self.loaded]
    }

    /// Records currently exposed to the viewer
    pub fn visible(&self) -> &[ExpenseRecord] {
        if self.keyword.is_some() {
            &self.matches
        } else {
            &self.items[..self.loaded]
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// Finite numbers only, so "nan" or "inf" fall through to text search
fn parse_amount(keyword: &str) -> Option<f64> {
    keyword.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn matches_amount(record: &ExpenseRecord, amount: f64) -> bool {
    [record.bill_amount, record.total_amount, record.amount_per_person]
        .iter()
        .any(|v| (v - amount).abs() < AMOUNT_EPSILON)
}
