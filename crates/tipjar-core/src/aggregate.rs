//! Scalar summaries and grouped sums over record collections
//!
//! Amount-only aggregations (summary, amount ranges) include undated
//! records; time-bucketed ones skip them.

use std::collections::HashMap;

use tracing::debug;

use crate::category::Category;
use crate::models::{AggregationResult, AmountRange, BucketTotal, CategorySlice, ExpenseRecord, RangeCount};
use crate::window::TimeWindow;

/// Divide, yielding 0 instead of NaN/infinity for an empty denominator
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Count, total, and per-record averages
pub fn summarize<'a, I>(records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let (count, total_amount, total_tip) = records
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(count, total, tip), r| {
            (count + 1, total + r.total_amount, tip + r.tip_amount)
        });

    AggregationResult {
        count,
        total_amount,
        average_per_record: ratio(total_amount, count as f64),
        average_tip: ratio(total_tip, count as f64),
    }
}

/// Sum totals per category and emit them in `order`, omitting zero sums.
///
/// Grouping is keyed on the stable category, never the display label.
/// Categories not listed in `order` are not emitted.
pub fn group_by_category(records: &[ExpenseRecord], order: &[Category]) -> Vec<CategorySlice> {
    let mut sums: HashMap<Category, f64> = HashMap::new();
    for record in records {
        *sums.entry(record.category()).or_insert(0.0) += record.total_amount;
    }

    debug!(
        records = records.len(),
        categories = sums.len(),
        "Grouped records by category"
    );

    order
        .iter()
        .filter_map(|category| {
            let total_amount = sums.get(category).copied().unwrap_or(0.0);
            (total_amount != 0.0).then(|| CategorySlice {
                category: *category,
                label: category.label().to_string(),
                total_amount,
            })
        })
        .collect()
}

/// Count records per fixed amount range. All five ranges are always present.
pub fn group_by_amount_range(records: &[ExpenseRecord]) -> Vec<RangeCount> {
    let mut counts: HashMap<AmountRange, usize> = HashMap::new();
    for record in records {
        *counts.entry(AmountRange::for_amount(record.total_amount)).or_insert(0) += 1;
    }

    AmountRange::all()
        .iter()
        .map(|range| RangeCount {
            range: *range,
            label: range.label().to_string(),
            count: counts.get(range).copied().unwrap_or(0),
        })
        .collect()
}

/// Sum totals per time bucket (half-open), in bucket order.
///
/// Buckets with no records still produce a zero entry so trend charts show gaps.
pub fn group_by_time_bucket<F>(
    records: &[ExpenseRecord],
    buckets: &[TimeWindow],
    label_for: F,
) -> Vec<BucketTotal>
where
    F: Fn(&TimeWindow) -> String,
{
    buckets
        .iter()
        .map(|window| {
            let (count, total_amount) = records
                .iter()
                .filter(|r| r.created_at.is_some_and(|t| window.contains(t)))
                .fold((0usize, 0.0), |(count, total), r| (count + 1, total + r.total_amount));

            BucketTotal {
                label: label_for(window),
                window: *window,
                total_amount,
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn record(total: f64) -> ExpenseRecord {
        ExpenseRecord::from_amounts(total, 0.0, 1)
    }

    fn in_category(total: f64, category: Category) -> ExpenseRecord {
        record(total).with_category(category)
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_summarize_scenario() {
        let records = vec![
            ExpenseRecord::from_amounts(100.0, 0.0, 1),
            ExpenseRecord::from_amounts(100.0, 0.0, 2),
            ExpenseRecord::from_amounts(100.0, 0.0, 1),
        ];
        let result = summarize(&records);
        assert_eq!(
            result,
            AggregationResult {
                count: 3,
                total_amount: 300.0,
                average_per_record: 100.0,
                average_tip: 0.0,
            }
        );
    }

    #[test]
    fn test_summarize_matches_manual_fold() {
        let records: Vec<_> = [12.5, 7.25, 300.0, 0.0, 41.1]
            .iter()
            .map(|t| ExpenseRecord::from_amounts(*t, 1.5, 1))
            .collect();
        let manual: f64 = records.iter().map(|r| r.total_amount).sum();
        let result = summarize(&records);
        assert_eq!(result.count, records.len());
        assert!((result.total_amount - manual).abs() < 1e-9);
        assert!((result.average_tip - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let empty: Vec<ExpenseRecord> = Vec::new();
        let result = summarize(&empty);
        assert_eq!(result, AggregationResult::default());
        assert!(!result.average_per_record.is_nan());
    }

    #[test]
    fn test_summarize_includes_undated_records() {
        let records = vec![record(10.0), record(20.0).with_created_at(day(1))];
        assert_eq!(summarize(&records).count, 2);
    }

    #[test]
    fn test_group_by_category_order_and_zero_omission() {
        let records = vec![
            in_category(100.0, Category::Food),
            in_category(700.0, Category::Housing),
            in_category(200.0, Category::Food),
        ];
        let order = [Category::Food, Category::Clothing, Category::Housing];
        let slices = group_by_category(&records, &order);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "食");
        assert_eq!(slices[0].total_amount, 300.0);
        assert_eq!(slices[1].label, "住");
        assert_eq!(slices[1].total_amount, 700.0);
    }

    #[test]
    fn test_group_by_category_follows_caller_order_not_magnitude() {
        let records = vec![
            in_category(5.0, Category::Travel),
            in_category(500.0, Category::Food),
        ];
        let slices = group_by_category(&records, &[Category::Travel, Category::Food]);
        assert_eq!(slices[0].category, Category::Travel);
        assert_eq!(slices[1].category, Category::Food);
    }

    #[test]
    fn test_group_by_category_unknown_bucket() {
        let mut bogus = record(40.0);
        bogus.category_id = Some("spaceship".to_string());
        let records = vec![record(10.0), bogus, in_category(5.0, Category::Pet)];

        let slices = group_by_category(&records, Category::default_order());
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, Category::Pet);
        assert_eq!(slices[1].category, Category::Unknown);
        assert_eq!(slices[1].total_amount, 50.0);
    }

    #[test]
    fn test_group_by_category_never_merges_distinct_categories() {
        let records: Vec<_> = Category::all()
            .iter()
            .map(|c| in_category(1.0, *c))
            .collect();
        let slices = group_by_category(&records, Category::default_order());
        assert_eq!(slices.len(), Category::all().len());
        assert!(slices.iter().all(|s| s.total_amount == 1.0));
    }

    #[test]
    fn test_group_by_amount_range_boundaries() {
        let records: Vec<_> = [0.0, 499.0, 500.0, 1999.0, 5000.0, 5001.0]
            .iter()
            .map(|t| record(*t))
            .collect();
        let ranges = group_by_amount_range(&records);

        let labels: Vec<&str> = ranges.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["0-500", "500-1K", "1K-2K", "2K-5K", "5K+"]);

        let counts: Vec<usize> = ranges.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 0, 2]);
    }

    #[test]
    fn test_group_by_amount_range_partition_is_complete() {
        let records: Vec<_> = (0..57).map(|i| record(i as f64 * 137.3)).collect();
        let total: usize = group_by_amount_range(&records).iter().map(|r| r.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_group_by_amount_range_empty_emits_all_buckets() {
        let ranges = group_by_amount_range(&[]);
        assert_eq!(ranges.len(), 5);
        assert!(ranges.iter().all(|r| r.count == 0));
    }

    #[test]
    fn test_group_by_time_bucket_half_open_and_zero_gaps() {
        let buckets = vec![
            TimeWindow::new(day(1), day(2)),
            TimeWindow::new(day(2), day(3)),
            TimeWindow::new(day(3), day(4)),
        ];
        let records = vec![
            record(10.0).with_created_at(day(1)),
            record(20.0).with_created_at(day(2)), // start of bucket 2, not end of bucket 1
            record(5.0).with_created_at(day(2) + Duration::hours(1)),
            record(99.0), // undated
        ];
        let totals = group_by_time_bucket(&records, &buckets, |w| w.start.format("%d").to_string());

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].label, "01");
        assert_eq!(totals[0].total_amount, 10.0);
        assert_eq!(totals[1].total_amount, 25.0);
        assert_eq!(totals[1].count, 2);
        assert_eq!(totals[2].total_amount, 0.0);
        assert_eq!(totals[2].count, 0);
    }

    #[test]
    fn test_ratio_guards_zero() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert_eq!(ratio(10.0, 4.0), 2.5);
    }
}
