/// Basic unit tests to verify core functionality
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use habit_tracker::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn days_ago(offsets: &[i64]) -> Completions {
        offsets.iter().map(|offset| today() - Duration::days(*offset)).collect()
    }

    #[test]
    fn test_habit_creation() {
        let created = Utc.with_ymd_and_hms(2024, 3, 14, 7, 30, 0).unwrap();
        let habit = Habit::new("Test Habit", Category::Health, Frequency::Daily, created);

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.created_at, created);
    }

    #[test]
    fn test_current_streak_cases() {
        assert_eq!(current_streak(&days_ago(&[0]), today()), 1);
        assert_eq!(current_streak(&days_ago(&[0, 1, 2]), today()), 3);
        assert_eq!(current_streak(&days_ago(&[1, 2]), today()), 2);
        assert_eq!(current_streak(&days_ago(&[2]), today()), 0);
    }

    #[test]
    fn test_best_streak_scans_whole_history() {
        assert_eq!(best_streak(&days_ago(&[0, 30, 31, 32, 33, 60])), 4);
    }

    #[test]
    fn test_progress_cases() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let mut daily = Habit::new("Floss", Category::Health, Frequency::Daily, created).unwrap();
        daily.completions = days_ago(&[0, 2, 4]);
        assert_eq!(progress_percentage(&daily, today()), 43);

        let weekly = Habit::new("Call mum", Category::Social, Frequency::Weekly, created).unwrap();
        assert_eq!(progress_percentage(&weekly, today()), 0);
    }

    #[test]
    fn test_week_runs_sunday_to_saturday() {
        let week = week_containing(today());
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_basic_enum_parsing() {
        assert_eq!("creative".parse::<Category>().unwrap(), Category::Creative);
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
    }
}
