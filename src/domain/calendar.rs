/// Period-aware date arithmetic for the scoring engine
///
/// This module provides the calendar operations the engine is built on:
/// deciding whether two instants fall in the same day/week/month, ordering
/// instants by the period that contains them, and enumerating the sequence
/// of periods between a habit's start date and "now".
///
/// Weekly comparisons depend on which weekday starts the week. That is a
/// locale setting in most calendar apps, so it is an explicit field here
/// rather than ambient state; the engine's weekly output changes with it.

use std::cmp::Ordering;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};

use crate::domain::TimePeriod;

/// Calendar helper parameterized by the first day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCalendar {
    pub first_weekday: Weekday,
}

impl Default for PeriodCalendar {
    fn default() -> Self {
        Self { first_weekday: Weekday::Mon }
    }
}

impl PeriodCalendar {
    pub fn new(first_weekday: Weekday) -> Self {
        Self { first_weekday }
    }

    /// Canonical start of the period containing `instant`
    ///
    /// Start of day for daily habits, first day of the week for weekly,
    /// first day of the month for monthly. Two instants share a period
    /// exactly when they canonicalize to the same date.
    pub fn beginning_of_period(&self, instant: NaiveDateTime, period: TimePeriod) -> NaiveDate {
        let date = instant.date();
        match period {
            TimePeriod::Daily => date,
            TimePeriod::Weekly => date.week(self.first_weekday).first_day(),
            TimePeriod::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// True iff both instants fall in the same calendar day/week/month
    pub fn same_period(&self, a: NaiveDateTime, b: NaiveDateTime, period: TimePeriod) -> bool {
        self.beginning_of_period(a, period) == self.beginning_of_period(b, period)
    }

    /// Ordering of the periods containing `a` and `b`
    ///
    /// Instants inside the same period compare equal regardless of
    /// time-of-day or position within the period.
    pub fn compare_period(
        &self,
        a: NaiveDateTime,
        b: NaiveDateTime,
        period: TimePeriod,
    ) -> Ordering {
        self.beginning_of_period(a, period)
            .cmp(&self.beginning_of_period(b, period))
    }

    /// Shift `instant` by `n` periods, preserving time-of-day
    ///
    /// Month arithmetic clamps to the end of shorter months (Jan 31 + 1
    /// month = Feb 28/29), matching ordinary calendar behavior.
    pub fn advance(&self, instant: NaiveDateTime, period: TimePeriod, n: i32) -> NaiveDateTime {
        let shifted = match period {
            TimePeriod::Daily => instant.checked_add_signed(Duration::days(n as i64)),
            TimePeriod::Weekly => instant.checked_add_signed(Duration::days(7 * n as i64)),
            TimePeriod::Monthly => {
                if n >= 0 {
                    instant.checked_add_months(Months::new(n as u32))
                } else {
                    instant.checked_sub_months(Months::new(n.unsigned_abs()))
                }
            }
        };
        // Out of range only at the extremes of chrono's date range.
        shifted.unwrap_or(instant)
    }

    /// Ascending sequence of period markers from `from`'s period through
    /// `to`'s period, one marker per period
    ///
    /// The final element is always `to` itself, so the current (possibly
    /// partial) period is represented exactly once as the last marker.
    /// Returns an empty sequence when `from > to`.
    pub fn period_markers(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        period: TimePeriod,
    ) -> Vec<NaiveDateTime> {
        if from > to {
            return Vec::new();
        }

        let mut markers = Vec::new();
        let mut cursor = from;
        while self.compare_period(cursor, to, period) == Ordering::Less {
            markers.push(cursor);
            cursor = self.advance(cursor, period, 1);
        }
        markers.push(to);

        markers
    }

    /// Signed number of period boundaries crossed going from `from` to `to`
    ///
    /// Zero when both instants share a period, negative when `to` precedes
    /// `from`. The inclusive variant below is what streak lengths use.
    pub fn periods_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        period: TimePeriod,
    ) -> i64 {
        match period {
            TimePeriod::Daily => (to.date() - from.date()).num_days(),
            TimePeriod::Weekly => {
                let from_week = self.beginning_of_period(from, TimePeriod::Weekly);
                let to_week = self.beginning_of_period(to, TimePeriod::Weekly);
                (to_week - from_week).num_days() / 7
            }
            TimePeriod::Monthly => {
                let from_months = from.date().year() as i64 * 12 + from.date().month0() as i64;
                let to_months = to.date().year() as i64 * 12 + to.date().month0() as i64;
                to_months - from_months
            }
        }
    }

    /// Number of periods from `from`'s period through `to`'s period inclusive
    pub fn periods_between_inclusive(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        period: TimePeriod,
    ) -> i64 {
        self.periods_between(from, to, period) + 1
    }

    /// Every calendar day from `from`'s day through `to`'s day inclusive
    ///
    /// The completion map is always day-keyed regardless of the habit's
    /// recurrence granularity, so this enumerates days rather than periods.
    /// Empty when `from > to`.
    pub fn days_through(&self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<NaiveDate> {
        if from > to {
            return Vec::new();
        }

        let mut days = Vec::new();
        let mut cursor = from.date();
        let last = to.date();
        while cursor <= last {
            days.push(cursor);
            cursor = match cursor.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        days
    }
}
