//! Time window resolution for KPI periods and trend buckets
//!
//! These are trailing-duration windows ending at "now". They are deliberately
//! distinct from the calendar-aligned "current period" checks used by list
//! filters (see [`crate::filter`]): "last 7 days" and "this week" select
//! different records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::Calendar;
use crate::models::{BucketUnit, Period};

/// A concrete time range. Half-open `[start, end)` unless a caller
/// explicitly uses [`TimeWindow::contains_inclusive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `start <= t < end`
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    /// `start <= t <= end`
    pub fn contains_inclusive(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Resolve a KPI period into a window ending at `now`.
///
/// Windows from this function are meant to be tested with
/// [`TimeWindow::contains_inclusive`] so that an entry stamped exactly at
/// `now` (or at the start boundary) is counted. Returns `None` if calendar
/// arithmetic fails.
pub fn resolve(period: Period, now: DateTime<Utc>, calendar: &Calendar) -> Option<TimeWindow> {
    let start = match period {
        Period::Today => calendar.start_of_day(now),
        Period::Last7Days => calendar.sub_days(now, 7),
        Period::LastMonth => calendar.sub_months(now, 1),
        Period::LastYear => calendar.sub_years(now, 1),
    };

    match start {
        Some(start) => Some(TimeWindow::new(start, now)),
        None => {
            warn!(period = period.as_str(), %now, "Could not resolve period window");
            None
        }
    }
}

/// Generate `count` trailing, non-overlapping buckets ending at `now`, in
/// ascending chronological order.
///
/// - Day: whole local calendar days, the last one being today
///   (`[startOfDay(now - i), startOfDay(now - i + 1))`).
/// - Week: 7-day windows chained back from `now`.
/// - Month/Year: calendar months/years chained back from `now`.
///
/// A bucket whose boundaries cannot be computed is dropped; the result may be
/// shorter than `count`. Once one bucket fails every older one fails too, so
/// generation stops there.
pub fn trailing_buckets(
    unit: BucketUnit,
    count: usize,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> Vec<TimeWindow> {
    let mut buckets = Vec::new();

    for i in 0..count {
        match bucket_at(unit, i, now, calendar) {
            Some(window) => buckets.push(window),
            None => {
                warn!(
                    unit = unit.as_str(),
                    offset = i,
                    dropped = count - i,
                    "Dropping trend buckets outside the supported date range"
                );
                break;
            }
        }
    }

    buckets.reverse();
    buckets
}

/// The bucket `offset` steps back from the newest one
fn bucket_at(
    unit: BucketUnit,
    offset: usize,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> Option<TimeWindow> {
    let offset = u32::try_from(offset).ok()?;

    match unit {
        BucketUnit::Day => {
            let day = calendar.sub_calendar_days(calendar.date_of(now), offset as u64)?;
            let start = calendar.start_of_date(day)?;
            let end = calendar.start_of_date(day.succ_opt()?)?;
            Some(TimeWindow::new(start, end))
        }
        BucketUnit::Week => {
            let end = calendar.sub_days(now, 7 * offset as i64)?;
            let start = calendar.sub_days(end, 7)?;
            Some(TimeWindow::new(start, end))
        }
        BucketUnit::Month => {
            let end = calendar.sub_months(now, offset)?;
            let start = calendar.sub_months(now, offset.checked_add(1)?)?;
            Some(TimeWindow::new(start, end))
        }
        BucketUnit::Year => {
            let end = calendar.sub_years(now, offset)?;
            let start = calendar.sub_years(now, offset.checked_add(1)?)?;
            Some(TimeWindow::new(start, end))
        }
    }
}

/// Default chart label for a bucket, in local time
pub fn bucket_label(unit: BucketUnit, window: &TimeWindow, calendar: &Calendar) -> String {
    match unit {
        BucketUnit::Day | BucketUnit::Week => {
            calendar.local(window.start).format("%m/%d").to_string()
        }
        // Month and year buckets are named after the period they end in
        BucketUnit::Month => calendar.local(window.end).format("%Y-%m").to_string(),
        BucketUnit::Year => calendar.local(window.end).format("%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        at(2024, 3, 15, 15, 30)
    }

    #[test]
    fn test_half_open_vs_inclusive() {
        let w = TimeWindow::new(at(2024, 3, 1, 0, 0), at(2024, 3, 2, 0, 0));
        assert!(w.contains(w.start));
        assert!(!w.contains(w.end));
        assert!(w.contains_inclusive(w.start));
        assert!(w.contains_inclusive(w.end));
        assert!(!w.contains_inclusive(w.end + Duration::seconds(1)));
    }

    #[test]
    fn test_resolve_today_is_inclusive_of_now() {
        let w = resolve(Period::Today, now(), &Calendar::utc()).unwrap();
        assert_eq!(w.start, at(2024, 3, 15, 0, 0));
        assert_eq!(w.end, now());
        assert!(w.contains_inclusive(now()));
    }

    #[test]
    fn test_resolve_trailing_periods() {
        let cal = Calendar::utc();
        let w = resolve(Period::Last7Days, now(), &cal).unwrap();
        assert_eq!(w.start, at(2024, 3, 8, 15, 30));

        let w = resolve(Period::LastMonth, now(), &cal).unwrap();
        assert_eq!(w.start, at(2024, 2, 15, 15, 30));

        let w = resolve(Period::LastYear, now(), &cal).unwrap();
        assert_eq!(w.start, at(2023, 3, 15, 15, 30));
        assert_eq!(w.end, now());
    }

    #[test]
    fn test_resolve_overflow_returns_none() {
        let early = DateTime::<Utc>::MIN_UTC;
        assert!(resolve(Period::LastYear, early, &Calendar::utc()).is_none());
    }

    #[test]
    fn test_day_buckets_ascending_calendar_days() {
        let buckets = trailing_buckets(BucketUnit::Day, 3, now(), &Calendar::utc());
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].start, at(2024, 3, 13, 0, 0));
        assert_eq!(buckets[0].end, at(2024, 3, 14, 0, 0));
        assert_eq!(buckets[2].start, at(2024, 3, 15, 0, 0));
        assert_eq!(buckets[2].end, at(2024, 3, 16, 0, 0));
        assert!(buckets.windows(2).all(|w| w[0].end == w[1].start));
    }

    #[test]
    fn test_week_buckets_chain_back_from_now() {
        let buckets = trailing_buckets(BucketUnit::Week, 2, now(), &Calendar::utc());
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[1].end, now());
        assert_eq!(buckets[1].start, now() - Duration::days(7));
        assert_eq!(buckets[0].end, buckets[1].start);
        assert_eq!(buckets[0].start, now() - Duration::days(14));
    }

    #[test]
    fn test_month_buckets_are_calendar_months() {
        let buckets = trailing_buckets(BucketUnit::Month, 3, now(), &Calendar::utc());
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].start, at(2023, 12, 15, 15, 30));
        assert_eq!(buckets[1].start, at(2024, 1, 15, 15, 30));
        assert_eq!(buckets[2].start, at(2024, 2, 15, 15, 30));
        assert_eq!(buckets[2].end, now());
        assert!(buckets.windows(2).all(|w| w[0].end == w[1].start));
    }

    #[test]
    fn test_year_buckets() {
        let buckets = trailing_buckets(BucketUnit::Year, 2, now(), &Calendar::utc());
        assert_eq!(buckets[0].start, at(2022, 3, 15, 15, 30));
        assert_eq!(buckets[0].end, at(2023, 3, 15, 15, 30));
        assert_eq!(buckets[1].end, now());
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(trailing_buckets(BucketUnit::Month, 0, now(), &Calendar::utc()).is_empty());
    }

    #[test]
    fn test_overflowing_buckets_are_dropped() {
        // Close to the minimum representable date only the newest buckets survive
        let early = DateTime::<Utc>::MIN_UTC + Duration::days(3 * 366 + 40);
        let buckets = trailing_buckets(BucketUnit::Year, 10, early, &Calendar::utc());
        assert!(buckets.len() < 10);
        assert!(!buckets.is_empty());
        assert_eq!(buckets.last().unwrap().end, early);
        assert!(buckets.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_huge_count_stops_at_date_range_limit() {
        let buckets = trailing_buckets(BucketUnit::Year, usize::MAX / 8, now(), &Calendar::utc());
        assert!(!buckets.is_empty());
        assert!(buckets.len() < 300_000);
        assert_eq!(buckets.last().unwrap().end, now());
        assert!(buckets.windows(2).all(|w| w[0].end == w[1].start));
    }

    #[test]
    fn test_bucket_labels() {
        let cal = Calendar::utc();
        let day = trailing_buckets(BucketUnit::Day, 1, now(), &cal)[0];
        assert_eq!(bucket_label(BucketUnit::Day, &day, &cal), "03/15");

        // Week buckets are named after the day they start on
        let weeks = trailing_buckets(BucketUnit::Week, 2, now(), &cal);
        assert_eq!(bucket_label(BucketUnit::Week, &weeks[1], &cal), "03/08");
        assert_eq!(bucket_label(BucketUnit::Week, &weeks[0], &cal), "03/01");

        let month = trailing_buckets(BucketUnit::Month, 1, now(), &cal)[0];
        assert_eq!(bucket_label(BucketUnit::Month, &month, &cal), "2024-03");

        let year = trailing_buckets(BucketUnit::Year, 1, now(), &cal)[0];
        assert_eq!(bucket_label(BucketUnit::Year, &year, &cal), "2024");
    }
}
