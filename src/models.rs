use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Todo,
    InProgress,
    Done,
}

impl GoalStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl GoalPriority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Informational only: streaks use daily arithmetic for every habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

impl HabitFrequency {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub category: String,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    pub milestones: Vec<Milestone>,
}

impl Goal {
    /// Completed milestones as a whole percentage. Zero when there are none.
    pub fn progress(&self) -> u8 {
        let total = self.milestones.len();
        if total == 0 {
            return 0;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        ((done as f64 / total as f64) * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitLog {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: String,
    pub frequency: HabitFrequency,
    pub reminder_time: String,
    pub logs: Vec<HabitLog>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub points: u64,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedGoal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedHabit {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub frequency: HabitFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_goals: usize,
    pub completed_goals: usize,
    pub habits_completed_today: usize,
    pub total_habits: usize,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub date: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitView {
    #[serde(flatten)]
    pub habit: Habit,
    pub current_streak: u32,
    pub completed_today: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityPoint>,
    pub in_progress: Vec<GoalView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalToggleResponse {
    pub goal: GoalView,
    pub points: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitToggleResponse {
    pub habit: HabitView,
    pub points: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_with(done: usize, total: usize) -> Goal {
        Goal {
            id: "goal-t".into(),
            title: "Test".into(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            category: "Tests".into(),
            priority: GoalPriority::Low,
            status: GoalStatus::Todo,
            milestones: (0..total)
                .map(|i| Milestone {
                    id: format!("m-{i}"),
                    text: format!("step {i}"),
                    completed: i < done,
                })
                .collect(),
        }
    }

    #[test]
    fn progress_is_fraction_of_completed_milestones() {
        assert_eq!(goal_with(1, 4).progress(), 25);
        assert_eq!(goal_with(4, 4).progress(), 100);
        assert_eq!(goal_with(5, 12).progress(), 42);
    }

    #[test]
    fn progress_without_milestones_is_zero() {
        assert_eq!(goal_with(0, 0).progress(), 0);
    }

    #[test]
    fn habit_log_serializes_as_plain_date() {
        let log = HabitLog {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        };
        let json = serde_json::to_value(log).unwrap();
        assert_eq!(json, serde_json::json!({ "date": "2026-03-01" }));
    }
}
