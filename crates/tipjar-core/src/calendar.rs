//! Calendar context for day/week/month/year boundaries
//!
//! Timestamps are stored in UTC; boundaries are computed in the user's local
//! time through a fixed UTC offset. Arithmetic helpers return `None` instead
//! of panicking when a date would overflow.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, Offset, TimeDelta, Utc,
};

/// Locale context threaded through every time-aware operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar for a UTC offset in minutes (e.g. 480 for UTC+8)
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn local(&self, t: DateTime<Utc>) -> DateTime<FixedOffset> {
        t.with_timezone(&self.offset)
    }

    /// Local calendar date of an instant
    pub fn date_of(&self, t: DateTime<Utc>) -> NaiveDate {
        self.local(t).date_naive()
    }

    /// Local midnight of a calendar date, as a UTC instant
    pub fn start_of_date(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_opt(0, 0, 0)?
            .and_local_timezone(self.offset)
            .single()
            .map(|d| d.with_timezone(&Utc))
    }

    pub fn start_of_day(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.start_of_date(self.date_of(t))
    }

    pub fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.date_of(a) == self.date_of(b)
    }

    /// Same ISO week (ISO week-numbering year and week number)
    pub fn is_same_week(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        let (wa, wb) = (self.date_of(a).iso_week(), self.date_of(b).iso_week());
        wa.year() == wb.year() && wa.week() == wb.week()
    }

    pub fn is_same_month(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        let (da, db) = (self.date_of(a), self.date_of(b));
        da.year() == db.year() && da.month() == db.month()
    }

    pub fn is_same_year(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.date_of(a).year() == self.date_of(b).year()
    }

    /// Subtract a fixed number of 24-hour days
    pub fn sub_days(&self, t: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
        t.checked_sub_signed(TimeDelta::try_days(days)?)
    }

    /// Subtract whole local calendar days from a date
    pub fn sub_calendar_days(&self, date: NaiveDate, days: u64) -> Option<NaiveDate> {
        date.checked_sub_days(Days::new(days))
    }

    /// Subtract calendar months in local time. Day-of-month clamps to the
    /// last valid day (Mar 31 minus one month is Feb 28/29).
    pub fn sub_months(&self, t: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
        self.local(t)
            .checked_sub_months(Months::new(months))
            .map(|d| d.with_timezone(&Utc))
    }

    pub fn sub_years(&self, t: DateTime<Utc>, years: u32) -> Option<DateTime<Utc>> {
        self.sub_months(t, years.checked_mul(12)?)
    }
}
