use crate::models::{HabitLog, StreakSummary};
use chrono::{Duration, Local, NaiveDate};
use std::collections::BTreeSet;

pub fn calculate_streak(logs: &[HabitLog]) -> StreakSummary {
    calculate_streak_at(today(), logs)
}

/// Counts consecutive logged days ending at the anchor: today when today is
/// logged, yesterday otherwise. Duplicate logs count once; logs after the
/// anchor are ignored.
pub fn calculate_streak_at(today: NaiveDate, logs: &[HabitLog]) -> StreakSummary {
    if logs.is_empty() {
        return StreakSummary::default();
    }

    let dates: BTreeSet<NaiveDate> = logs.iter().map(|log| log.date).collect();

    let mut expected = if dates.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut current_streak = 0u32;
    for date in dates.range(..=expected).rev() {
        if *date != expected {
            break;
        }
        current_streak += 1;
        expected = expected - Duration::days(1);
    }

    StreakSummary { current_streak }
}

pub fn is_completed_today(logs: &[HabitLog]) -> bool {
    is_completed_on(today(), logs)
}

pub fn is_completed_on(day: NaiveDate, logs: &[HabitLog]) -> bool {
    logs.iter().any(|log| log.date == day)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
