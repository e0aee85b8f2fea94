/// Windowed progress percentage
///
/// Daily habits look at the 7 days ending today. Weekly habits look at the
/// 4 Sunday-to-Saturday weeks ending with the current one, where a week
/// counts if the habit was done on any of its days.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{Completions, Frequency, Habit};

/// Days in the daily window
pub const DAILY_WINDOW_DAYS: u32 = 7;

/// Weeks in the weekly window
pub const WEEKLY_WINDOW_WEEKS: u32 = 4;

/// Progress of a habit over its frequency's window, 0 to 100
pub fn progress_percentage(habit: &Habit, today: NaiveDate) -> u8 {
    match habit.frequency {
        Frequency::Daily => daily_progress(&habit.completions, today),
        Frequency::Weekly => weekly_progress(&habit.completions, today),
    }
}

/// Share of the last 7 days (today included) that were completed
pub fn daily_progress(completions: &Completions, today: NaiveDate) -> u8 {
    let window_start = today - Duration::days(i64::from(DAILY_WINDOW_DAYS) - 1);
    let completed = completions.count_in(window_start..=today) as u32;
    rounded_percentage(completed, DAILY_WINDOW_DAYS)
}

/// Share of the last 4 weeks (current week included) with any completion
pub fn weekly_progress(completions: &Completions, today: NaiveDate) -> u8 {
    let current_week_start = week_start(today);

    let completed = (0..WEEKLY_WINDOW_WEEKS)
        .map(|offset| current_week_start - Duration::weeks(i64::from(offset)))
        .filter(|start| completions.any_in(*start..=*start + Duration::days(6)))
        .count() as u32;

    rounded_percentage(completed, WEEKLY_WINDOW_WEEKS)
}

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Sunday through Saturday of the week containing `date`
pub fn week_containing(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// `100 * hits / total`, rounded half up
fn rounded_percentage(hits: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let hits = hits.min(total);
    ((200 * hits + total) / (2 * total)) as u8
}
