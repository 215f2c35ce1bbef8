/// Habit scoring and streak engine
///
/// This module turns a habit's configuration and completion history into its
/// derived values: the momentum score in [0, 1], the current-period status,
/// the per-day completion map used for calendar rendering, and the streak.
///
/// Everything here is a pure function over `(&Habit, now)`: no I/O, no
/// clocks, no shared state. Callers recompute after each mutation and cache
/// the results however they like; re-running any of these functions is
/// idempotent. The only precondition is that `completed_dates` is sorted
/// ascending, which the Habit mutation operations maintain.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Weekday};

use crate::domain::{Habit, HabitStatus, PeriodCalendar};

/// Score gained by a period that met its required completions
const REWARD_STEP: f64 = 0.1;

/// Score lost by a past period that fell short
///
/// Twice the reward step: a lapse costs more ground than one good period
/// regains.
const DECAY_STEP: f64 = 0.2;

/// Scores below this threshold count as "no active streak"
const STREAK_THRESHOLD: f64 = 0.1;

/// Computes scores, statuses, and streaks for habits
///
/// Carries the calendar configuration (first weekday of the week) that
/// weekly comparisons depend on. The engine holds no other state and is
/// cheap to construct.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    calendar: PeriodCalendar,
}

impl ScoringEngine {
    /// Create an engine with the default calendar (weeks start on Monday)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose weeks start on the given weekday
    pub fn with_first_weekday(first_weekday: Weekday) -> Self {
        Self {
            calendar: PeriodCalendar::new(first_weekday),
        }
    }

    pub fn calendar(&self) -> &PeriodCalendar {
        &self.calendar
    }

    /// The habit's momentum score, from `0.0` to `1.0`
    ///
    /// A single forward scan over the period sequence from the start date
    /// through `now`, with a cursor into the sorted completion history.
    /// Each satisfied period adds `0.1`, each missed past period subtracts
    /// `0.2`, and the current period only ever adds partial credit
    /// proportional to its progress - an unfinished "today" never drags the
    /// score down.
    pub fn calculate_score(&self, habit: &Habit, now: NaiveDateTime) -> f64 {
        let period = habit.time_period;
        let required = habit.required_count.max(1);
        let dates = &habit.completed_dates;

        let mut score: f64 = 0.0;
        let mut tracker = 0;

        for marker in self.calendar.period_markers(habit.start_date, now, period) {
            // A period with nothing to consume: the next unconsumed
            // completion lies in a later period, or the history ran out
            // before reaching the current period.
            let before_next_completion = tracker < dates.len()
                && self.calendar.compare_period(marker, dates[tracker], period) == Ordering::Less;
            let exhausted_past =
                tracker >= dates.len() && !self.calendar.same_period(marker, now, period);

            if before_next_completion || exhausted_past {
                score = (score - DECAY_STEP).max(0.0);
                continue;
            }

            // Count the completions that fall in this period.
            let mut count: u32 = 0;
            while tracker < dates.len()
                && self.calendar.compare_period(marker, dates[tracker], period) == Ordering::Equal
            {
                tracker += 1;
                count += 1;
            }

            if count >= required {
                score = (score + REWARD_STEP).min(1.0);
            } else if self.calendar.same_period(marker, now, period) {
                // Partial credit for the current period's progress.
                score = (score + REWARD_STEP / required as f64 * count as f64).min(1.0);
            } else {
                score = (score - DECAY_STEP).max(0.0);
            }
        }

        score
    }

    /// Completion state of the current period
    ///
    /// Walks the history backward from the newest entry, counting entries
    /// that share the current period; stops as soon as the requirement is
    /// met or an older period is reached. Unlike `calculate_score` this
    /// never scans the full history.
    pub fn status(&self, habit: &Habit, now: NaiveDateTime) -> HabitStatus {
        let required = habit.required_count.max(1);
        let mut count: u32 = 0;

        for date in habit.completed_dates.iter().rev() {
            if !self.calendar.same_period(*date, now, habit.time_period) {
                break;
            }
            count += 1;
            if count >= required {
                return HabitStatus::Complete;
            }
        }

        HabitStatus::Pending(count)
    }

    /// Raw number of completions logged in the current period
    ///
    /// Not capped at the required count, so the caller can show
    /// over-completion like "4 / 3".
    pub fn completions_in_period(&self, habit: &Habit, now: NaiveDateTime) -> u32 {
        let mut count: u32 = 0;

        for date in habit.completed_dates.iter().rev() {
            if !self.calendar.same_period(*date, now, habit.time_period) {
                break;
            }
            count += 1;
        }

        count
    }

    /// Per-day completion counts from the start date through `now`
    ///
    /// Always keyed by calendar day regardless of the habit's recurrence
    /// granularity - this feeds a day-grid calendar. Every day in range is
    /// present, zero-count days included. A day counts as visually complete
    /// when its count reaches `required_count`.
    pub fn completion_map(&self, habit: &Habit, now: NaiveDateTime) -> BTreeMap<NaiveDate, u32> {
        let mut map: BTreeMap<NaiveDate, u32> = BTreeMap::new();

        for day in self.calendar.days_through(habit.start_date, now) {
            map.insert(day, 0);
        }
        for date in &habit.completed_dates {
            *map.entry(date.date()).or_insert(0) += 1;
        }

        map
    }

    /// The instant at which the current unbroken streak began
    ///
    /// Re-runs the scoring scan and remembers the most recent point where
    /// the score left zero. If the habit ends the scan with effectively no
    /// score, there is no active streak and `now` is returned.
    pub fn start_of_most_recent_streak(&self, habit: &Habit, now: NaiveDateTime) -> NaiveDateTime {
        let period = habit.time_period;
        let required = habit.required_count.max(1);
        let dates = &habit.completed_dates;

        let mut streak_start = habit.start_date;
        let mut score: f64 = 0.0;
        let mut prev_score: f64 = 0.0;
        let mut tracker = 0;

        for marker in self.calendar.period_markers(habit.start_date, now, period) {
            let mut count: u32 = 0;
            while tracker < dates.len()
                && self.calendar.compare_period(marker, dates[tracker], period) == Ordering::Equal
            {
                tracker += 1;
                count += 1;
            }

            if count >= required {
                score = (score + REWARD_STEP).min(1.0);
            } else if self.calendar.same_period(marker, now, period) {
                score = (score + REWARD_STEP / required as f64 * count as f64).min(1.0);
            } else {
                score = (score - DECAY_STEP).max(0.0);
            }

            // The score just left zero: a new streak begins here.
            if prev_score == 0.0 && score > 0.0 {
                streak_start = marker;
            }

            prev_score = score;
        }

        if score < STREAK_THRESHOLD {
            return now;
        }

        streak_start
    }

    /// Length of the current streak in periods
    ///
    /// Counts periods inclusively from the streak start through `now`, or
    /// through the previous period when the current one is still pending -
    /// an unfinished "today" neither extends nor breaks the streak.
    pub fn streak_length(&self, habit: &Habit, now: NaiveDateTime) -> u32 {
        let end = if self.status(habit, now).is_complete() {
            now
        } else {
            self.calendar.advance(now, habit.time_period, -1)
        };

        let start = self.start_of_most_recent_streak(habit, now);
        let length = self
            .calendar
            .periods_between_inclusive(start, end, habit.time_period);

        length.max(0) as u32
    }

    /// User-facing streak summary, e.g. "3 day streak"
    pub fn streak_description(&self, habit: &Habit, now: NaiveDateTime) -> String {
        format!(
            "{} {} streak",
            self.streak_length(habit, now),
            habit.time_period.unit_name()
        )
    }

    /// Cycle the habit's completion state for the current period
    ///
    /// The tap-to-complete entry point. While the current period is still
    /// pending this appends a completion at `now`; once the period is
    /// complete, another call is an undo and rewinds every completion
    /// logged in the current period. Returns the status after the change.
    pub fn complete(&self, habit: &mut Habit, now: NaiveDateTime) -> HabitStatus {
        if self.status(habit, now).is_complete() {
            while let Some(last) = habit.completed_dates.last().copied() {
                if !self.calendar.same_period(last, now, habit.time_period) {
                    break;
                }
                habit.completed_dates.pop();
            }
        } else {
            habit.push_completion(now);
        }

        self.status(habit, now)
    }

    /// Remove the most recent completion if it falls in the current period
    ///
    /// Single-step undo. Returns whether anything was removed; completions
    /// from earlier periods are never touched.
    pub fn revert_completion(&self, habit: &mut Habit, now: NaiveDateTime) -> bool {
        if let Some(last) = habit.completed_dates.last().copied() {
            if self.calendar.same_period(last, now, habit.time_period) {
                habit.completed_dates.pop();
                return true;
            }
        }
        false
    }

    /// Round a score for display, keeping the raw value for computation
    pub fn round_for_display(score: f64) -> f64 {
        (score * 1000.0).round() / 1000.0
    }
}
