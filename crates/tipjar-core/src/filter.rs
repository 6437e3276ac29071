//! List filtering and sorting
//!
//! Each [`FilterOption`] is a selection predicate followed by an ordering.
//! Time-scoped options select the calendar-aligned *current* period (same
//! day, ISO week, month, or year as `now`), not a trailing duration.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::calendar::Calendar;
use crate::models::{ExpenseRecord, FilterOption};

/// Apply a filter/sort policy, producing a fresh ordered list.
///
/// Sorting is stable: records with equal keys keep their input order.
pub fn apply(
    option: FilterOption,
    records: &[ExpenseRecord],
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> Vec<ExpenseRecord> {
    let mut selected: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| matches(option, r, now, calendar))
        .cloned()
        .collect();

    sort(option, &mut selected);

    debug!(
        filter = option.as_str(),
        input = records.len(),
        output = selected.len(),
        "Applied record filter"
    );

    selected
}

/// Selection predicate for one record
pub fn matches(
    option: FilterOption,
    record: &ExpenseRecord,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> bool {
    if !option.is_time_scoped() {
        return true;
    }

    let Some(created_at) = record.created_at else {
        return false;
    };

    match option {
        FilterOption::Today => calendar.is_same_day(created_at, now),
        FilterOption::ThisWeek => calendar.is_same_week(created_at, now),
        FilterOption::ThisMonth => calendar.is_same_month(created_at, now),
        FilterOption::ThisYear => calendar.is_same_year(created_at, now),
        _ => true,
    }
}

/// Order records in place according to the option (stable)
pub fn sort(option: FilterOption, records: &mut [ExpenseRecord]) {
    match option {
        // Option<DateTime> orders None first, so undated records sort as oldest
        FilterOption::Newest
        | FilterOption::Today
        | FilterOption::ThisWeek
        | FilterOption::ThisMonth
        | FilterOption::ThisYear => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        FilterOption::Oldest => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        FilterOption::MostExpensive => {
            records.sort_by(|a, b| b.amount_per_person.total_cmp(&a.amount_per_person))
        }
        FilterOption::Cheapest => {
            records.sort_by(|a, b| a.amount_per_person.total_cmp(&b.amount_per_person))
        }
    }
}
