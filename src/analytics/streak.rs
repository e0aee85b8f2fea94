/// Streak calculation
///
/// A streak is a run of calendar-adjacent completion days. The current
/// streak must end today or yesterday; the best streak is the longest run
/// anywhere in the history.

use chrono::{Duration, NaiveDate};

use crate::domain::Completions;

/// Calculate the current active streak
///
/// Counting starts at `today` if it is completed, otherwise at yesterday, so
/// a streak stays alive until the day is over. The value is the run ending at
/// the starting day; an incomplete today adds nothing.
pub fn current_streak(completions: &Completions, today: NaiveDate) -> u32 {
    let yesterday = today - Duration::days(1);

    let mut checking_date = if completions.contains(today) {
        today
    } else if completions.contains(yesterday) {
        yesterday
    } else {
        return 0;
    };

    // Count consecutive days backwards
    let mut streak = 0;
    while completions.contains(checking_date) {
        streak += 1;
        match checking_date.pred_opt() {
            Some(previous) => checking_date = previous,
            None => break,
        }
    }

    streak
}

/// Calculate the longest run of consecutive days ever completed
///
/// Dates are visited in ascending order; the run resets whenever the next
/// completed date is not the day right after the previous one.
pub fn best_streak(completions: &Completions) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut last_date: Option<NaiveDate> = None;

    for date in completions.iter() {
        run = match last_date {
            Some(last) if last.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last_date = Some(date);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn days_ago(offsets: &[i64]) -> Completions {
        offsets
            .iter()
            .map(|offset| today() - Duration::days(*offset))
            .collect()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(current_streak(&Completions::new(), today()), 0);
        assert_eq!(best_streak(&Completions::new()), 0);
    }

    #[test]
    fn test_single_completion_today() {
        assert_eq!(current_streak(&days_ago(&[0]), today()), 1);
    }

    #[test]
    fn test_run_ending_today() {
        assert_eq!(current_streak(&days_ago(&[0, 1, 2]), today()), 3);
    }

    #[test]
    fn test_streak_stays_alive_through_today() {
        // Today not done yet; the run ending yesterday still counts
        assert_eq!(current_streak(&days_ago(&[1, 2]), today()), 2);
    }

    #[test]
    fn test_gap_at_yesterday_breaks_streak() {
        assert_eq!(current_streak(&days_ago(&[2]), today()), 0);
        assert_eq!(current_streak(&days_ago(&[2, 3, 4]), today()), 0);
    }

    #[test]
    fn test_current_streak_stops_at_first_gap() {
        assert_eq!(current_streak(&days_ago(&[0, 1, 3, 4, 5]), today()), 2);
    }

    #[test]
    fn test_future_days_do_not_extend_streak() {
        let completions: Completions = [today() + Duration::days(1), today()].into_iter().collect();
        assert_eq!(current_streak(&completions, today()), 1);
    }

    #[test]
    fn test_best_streak_requires_calendar_adjacency() {
        // Three isolated days are three runs of one, not one run of three
        assert_eq!(best_streak(&days_ago(&[0, 2, 4])), 1);
        assert_eq!(best_streak(&days_ago(&[0, 1, 5, 6, 7, 8, 20])), 4);
    }

    #[test]
    fn test_best_streak_across_month_boundary() {
        let completions: Completions = ["2024-02-28", "2024-02-29", "2024-03-01"]
            .iter()
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
            .collect();
        assert_eq!(best_streak(&completions), 3);
    }

    #[test]
    fn test_best_streak_never_below_current() {
        let cases: [&[i64]; 4] = [&[0], &[1, 2, 3], &[0, 1, 9, 10, 11, 12], &[5, 6]];
        for offsets in cases {
            let completions = days_ago(offsets);
            assert!(best_streak(&completions) >= current_streak(&completions, today()));
        }
    }
}
