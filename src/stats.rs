use crate::models::{ActivityPoint, DashboardStats, Goal, GoalStatus, GoalView, Habit};
use crate::streak::{calculate_streak_at, is_completed_on, today};
use chrono::{Duration, NaiveDate};

pub const RECENT_ACTIVITY_DAYS: usize = 7;
pub const IN_PROGRESS_LIMIT: usize = 4;

pub fn compute_stats(goals: &[Goal], habits: &[Habit]) -> DashboardStats {
    compute_stats_at(today(), goals, habits)
}

pub fn compute_stats_at(today: NaiveDate, goals: &[Goal], habits: &[Habit]) -> DashboardStats {
    let completed_goals = goals
        .iter()
        .filter(|goal| goal.status == GoalStatus::Done)
        .count();

    let habits_completed_today = habits
        .iter()
        .filter(|habit| is_completed_on(today, &habit.logs))
        .count();

    let longest_streak = habits
        .iter()
        .map(|habit| calculate_streak_at(today, &habit.logs).current_streak)
        .max()
        .unwrap_or(0);

    DashboardStats {
        active_goals: goals.len() - completed_goals,
        completed_goals,
        habits_completed_today,
        total_habits: habits.len(),
        longest_streak,
    }
}

pub fn compute_recent_activity(habits: &[Habit], window_days: usize) -> Vec<ActivityPoint> {
    compute_recent_activity_at(today(), habits, window_days)
}

/// One point per day for the last `window_days` days, oldest first, the last
/// one being `today`. A zero window still yields today's point.
pub fn compute_recent_activity_at(
    today: NaiveDate,
    habits: &[Habit],
    window_days: usize,
) -> Vec<ActivityPoint> {
    let window = window_days.max(1);
    let mut points = Vec::with_capacity(window);
    for offset in (0..window).rev() {
        let date = today - Duration::days(offset as i64);
        let count = habits
            .iter()
            .filter(|habit| is_completed_on(date, &habit.logs))
            .count();
        points.push(ActivityPoint {
            date: date_key(date),
            label: date.format("%a").to_string(),
            count,
        });
    }
    points
}

pub fn in_progress_goals(goals: &[Goal], limit: usize) -> Vec<GoalView> {
    goals
        .iter()
        .filter(|goal| goal.status == GoalStatus::InProgress)
        .take(limit)
        .map(|goal| GoalView {
            progress: goal.progress(),
            goal: goal.clone(),
        })
        .collect()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalPriority, HabitFrequency, HabitLog, Milestone};

    fn habit(id: &str, today: NaiveDate, offsets: &[i64]) -> Habit {
        Habit {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            frequency: HabitFrequency::Daily,
            reminder_time: "08:00".into(),
            logs: offsets
                .iter()
                .map(|offset| HabitLog {
                    date: today - Duration::days(*offset),
                })
                .collect(),
        }
    }

    fn goal(id: &str, status: GoalStatus) -> Goal {
        Goal {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            category: "Tests".into(),
            priority: GoalPriority::Medium,
            status,
            milestones: vec![Milestone {
                id: format!("{id}-m1"),
                text: "first".into(),
                completed: true,
            }],
        }
    }

    #[test]
    fn stats_on_empty_lists_are_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let stats = compute_stats_at(today, &[], &[]);
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.longest_streak, 0);
    }

    #[test]
    fn stats_count_goals_and_habits() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let goals = vec![
            goal("a", GoalStatus::Todo),
            goal("b", GoalStatus::InProgress),
            goal("c", GoalStatus::Done),
        ];
        let habits = vec![
            habit("h1", today, &[0, 1]),
            habit("h2", today, &[1, 2, 3, 4]),
            habit("h3", today, &[5]),
        ];

        let stats = compute_stats_at(today, &goals, &habits);
        assert_eq!(stats.active_goals, 2);
        assert_eq!(stats.completed_goals, 1);
        assert_eq!(stats.habits_completed_today, 1);
        assert_eq!(stats.total_habits, 3);
        assert_eq!(stats.longest_streak, 4);
    }

    #[test]
    fn recent_activity_is_seven_days_ending_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let habits = vec![habit("h1", today, &[0, 2, 9]), habit("h2", today, &[2])];

        let points = compute_recent_activity_at(today, &habits, RECENT_ACTIVITY_DAYS);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].date, "2025-12-30");
        assert_eq!(points[6].date, "2026-01-05");
        assert_eq!(points[6].label, "Mon");
        assert_eq!(points[6].count, 1);
        assert_eq!(points[4].count, 2);
        let total: usize = points.iter().map(|p| p.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn recent_activity_without_habits_still_has_full_window() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let points = compute_recent_activity_at(today, &[], RECENT_ACTIVITY_DAYS);
        assert_eq!(points.len(), 7);
        assert!(points.iter().all(|p| p.count == 0));
        assert_eq!(compute_recent_activity_at(today, &[], 0).len(), 1);
    }

    #[test]
    fn in_progress_goals_are_limited() {
        let goals: Vec<Goal> = (0..6)
            .map(|i| goal(&format!("g{i}"), GoalStatus::InProgress))
            .chain(std::iter::once(goal("done", GoalStatus::Done)))
            .collect();
        let views = in_progress_goals(&goals, IN_PROGRESS_LIMIT);
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].goal.id, "g0");
        assert_eq!(views[0].progress, 100);
    }
}
