/// Command for rendering a habit's completion history as a day grid
///
/// The grid is always day-granular, whatever the habit's recurrence: the
/// completion map feeds one cell per calendar day from the start date
/// through today. A day shows a check once its own count reaches the
/// required count, and an `x N` multiplier when it absorbed more than the
/// requirement.

use serde::Serialize;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::domain::{Habit, ScoringEngine};
use crate::storage::HabitStore;
use crate::AppError;

/// Parameters for showing a habit's history
#[derive(Debug)]
pub struct HistoryParams {
    pub habit: String,
}

/// One calendar day in the history grid
#[derive(Debug, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u32,
    pub complete: bool,
}

/// Response from showing a habit's history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub habit_id: String,
    pub title: String,
    pub days: Vec<DayCell>,
    pub total_completions: usize,
    pub message: String,
}

/// Render the completion history of a habit
pub fn habit_history<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    params: HistoryParams,
    now: NaiveDateTime,
) -> Result<HistoryResponse, AppError> {
    let habit = super::find_habit(store, &params.habit)?;

    let required = habit.required_count.max(1);
    let days: Vec<DayCell> = engine
        .completion_map(&habit, now)
        .into_iter()
        .map(|(date, count)| DayCell {
            date,
            count,
            complete: count >= required,
        })
        .collect();

    let message = render_grid(&habit, engine.calendar().first_weekday, &days);

    Ok(HistoryResponse {
        habit_id: habit.id.to_string(),
        title: habit.title.clone(),
        total_completions: habit.completed_dates.len(),
        days,
        message,
    })
}

/// Column of `weekday` in a week starting on `first_weekday`
fn week_column(weekday: Weekday, first_weekday: Weekday) -> u32 {
    (weekday.num_days_from_monday() + 7 - first_weekday.num_days_from_monday()) % 7
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

fn weekday_header(first_weekday: Weekday) -> String {
    let mut header = String::new();
    let mut day = first_weekday;
    for _ in 0..7 {
        header.push_str(&format!("{:>4}", weekday_label(day)));
        day = day.succ();
    }
    header
}

/// Render month-by-month rows of day cells
fn render_grid(habit: &Habit, first_weekday: Weekday, days: &[DayCell]) -> String {
    let mut out = format!("{} - {}\n", habit.title, habit.schedule_description());

    let mut current_month: Option<(i32, u32)> = None;
    for cell in days {
        let month = (cell.date.year(), cell.date.month());
        let column = week_column(cell.date.weekday(), first_weekday);

        if current_month != Some(month) {
            out.push_str(&format!("\n{}\n", cell.date.format("%B %Y")));
            out.push_str(&weekday_header(first_weekday));
            out.push('\n');
            out.push_str(&"    ".repeat(column as usize));
            current_month = Some(month);
        } else if column == 0 {
            out.push('\n');
        }

        let text = if cell.count == 0 {
            "·".to_string()
        } else if !cell.complete {
            cell.count.to_string()
        } else if cell.count > habit.required_count.max(1) {
            format!("x{}", cell.count)
        } else {
            "✓".to_string()
        };
        out.push_str(&format!("{:>4}", text));
    }
    out.push('\n');

    out
}
