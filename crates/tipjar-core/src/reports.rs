//! Rankings, breakdowns, KPIs, and chart series
//!
//! Builds display-ready structures on top of [`crate::filter`],
//! [`crate::aggregate`], and [`crate::window`]. Values are raw numbers;
//! currency formatting belongs to the caller.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::aggregate::{group_by_time_bucket, ratio, summarize};
use crate::calendar::Calendar;
use crate::models::{
    AggregationResult, BreakdownRow, BucketTotal, BucketUnit, CategorySlice, Dashboard,
    ExpenseRecord, Period, RankKey,
};
use crate::window::{bucket_label, resolve, trailing_buckets};

/// Top `n` records by `key`, descending. Ties keep input order.
pub fn top_n(records: &[ExpenseRecord], n: usize, key: RankKey) -> Vec<ExpenseRecord> {
    let mut ranked: Vec<&ExpenseRecord> = records.iter().collect();
    ranked.sort_by(|a, b| key.value(b).total_cmp(&key.value(a)));
    ranked.into_iter().take(n).cloned().collect()
}

/// Percentage-of-total rows for the breakdown list, largest share first.
///
/// Unlike the chart series (which keeps category priority order), this list
/// is re-sorted by magnitude. Shares are fractions and are 0 when the total is 0.
pub fn category_breakdown(slices: &[CategorySlice]) -> Vec<BreakdownRow> {
    let total: f64 = slices.iter().map(|s| s.total_amount).sum();

    let mut rows: Vec<BreakdownRow> = slices
        .iter()
        .map(|s| BreakdownRow {
            category: s.category,
            label: s.label.clone(),
            amount: s.total_amount,
            percent_of_total: ratio(s.total_amount, total),
        })
        .collect();

    rows.sort_by(|a, b| b.percent_of_total.total_cmp(&a.percent_of_total));
    rows
}

/// Summary of records dated inside a trailing period (inclusive at both ends)
pub fn kpi(
    records: &[ExpenseRecord],
    period: Period,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> AggregationResult {
    let Some(window) = resolve(period, now, calendar) else {
        return AggregationResult::default();
    };

    summarize(
        records
            .iter()
            .filter(|r| r.created_at.is_some_and(|t| window.contains_inclusive(t))),
    )
}

/// KPI panel for all trailing periods plus an all-time summary
pub fn dashboard(records: &[ExpenseRecord], now: DateTime<Utc>, calendar: &Calendar) -> Dashboard {
    debug!(records = records.len(), %now, "Building dashboard");

    Dashboard {
        today: kpi(records, Period::Today, now, calendar),
        last_7_days: kpi(records, Period::Last7Days, now, calendar),
        last_month: kpi(records, Period::LastMonth, now, calendar),
        last_year: kpi(records, Period::LastYear, now, calendar),
        all_time: summarize(records),
    }
}

/// Trend chart series: `count` trailing buckets with default labels.
/// May be shorter than `count` if some buckets could not be computed.
pub fn trend_series(
    records: &[ExpenseRecord],
    unit: BucketUnit,
    count: usize,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> Vec<BucketTotal> {
    let buckets = trailing_buckets(unit, count, now, calendar);
    debug!(
        unit = unit.as_str(),
        requested = count,
        buckets = buckets.len(),
        "Building trend series"
    );
    group_by_time_bucket(records, &buckets, |w| bucket_label(unit, w, calendar))
}
