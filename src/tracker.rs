//! Owner of the goal and habit lists. Commands borrow the current snapshot
//! and return the next one; the receiver is never modified.

use crate::models::{
    Goal, GoalPriority, GoalStatus, GoalView, Habit, HabitLog, HabitView, Milestone,
    SuggestedGoal, SuggestedHabit, User,
};
use crate::rewards::{HABIT_POINTS, MILESTONE_POINTS};
use crate::seed;
use crate::streak::{calculate_streak_at, is_completed_on};
use chrono::{Months, NaiveDate};
use std::collections::BTreeSet;
use thiserror::Error;

pub const SUGGESTED_GOAL_MONTHS: u32 = 3;
pub const DEFAULT_REMINDER: &str = "08:00";
const DEFAULT_MILESTONES: [&str; 3] = ["Plan the first steps", "Reach 50% progress", "Finish the goal"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("goal '{0}' not found")]
    GoalNotFound(String),

    #[error("milestone '{milestone_id}' not found in goal '{goal_id}'")]
    MilestoneNotFound {
        goal_id: String,
        milestone_id: String,
    },

    #[error("habit '{0}' not found")]
    HabitNotFound(String),

    #[error("suggestion '{0}' was already added")]
    AlreadyAdded(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    pub goals: Vec<Goal>,
    pub habits: Vec<Habit>,
    pub user: User,
    pub added_suggestions: BTreeSet<String>,
}

impl Tracker {
    pub fn new(goals: Vec<Goal>, habits: Vec<Habit>, user: User) -> Self {
        Self {
            goals,
            habits,
            user,
            added_suggestions: BTreeSet::new(),
        }
    }

    pub fn seeded(today: NaiveDate) -> Self {
        Self::new(seed::goals(today), seed::habits(today), seed::user())
    }

    pub fn goal_views(&self) -> Vec<GoalView> {
        self.goals.iter().map(goal_view).collect()
    }

    pub fn habit_views_at(&self, today: NaiveDate) -> Vec<HabitView> {
        self.habits
            .iter()
            .map(|habit| habit_view(today, habit))
            .collect()
    }

    pub fn goal_view(&self, goal_id: &str) -> Option<GoalView> {
        self.goals.iter().find(|g| g.id == goal_id).map(goal_view)
    }

    pub fn habit_view_at(&self, today: NaiveDate, habit_id: &str) -> Option<HabitView> {
        self.habits
            .iter()
            .find(|h| h.id == habit_id)
            .map(|habit| habit_view(today, habit))
    }

    pub fn is_added(&self, suggestion_id: &str) -> bool {
        self.added_suggestions.contains(suggestion_id)
    }

    pub fn toggle_milestone(&self, goal_id: &str, milestone_id: &str) -> Result<Self, TrackerError> {
        let mut next = self.clone();
        let goal = next
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| TrackerError::GoalNotFound(goal_id.to_string()))?;
        let milestone = goal
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| TrackerError::MilestoneNotFound {
                goal_id: goal_id.to_string(),
                milestone_id: milestone_id.to_string(),
            })?;

        milestone.completed = !milestone.completed;
        if milestone.completed {
            next.user.points = next.user.points.saturating_add(MILESTONE_POINTS);
        }
        Ok(next)
    }

    /// Adds today's log when missing (awarding points), removes it otherwise.
    pub fn toggle_habit_today(&self, habit_id: &str, today: NaiveDate) -> Result<Self, TrackerError> {
        let mut next = self.clone();
        let habit = next
            .habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| TrackerError::HabitNotFound(habit_id.to_string()))?;

        if is_completed_on(today, &habit.logs) {
            habit.logs.retain(|log| log.date != today);
        } else {
            habit.logs.push(HabitLog { date: today });
            next.user.points = next.user.points.saturating_add(HABIT_POINTS);
        }
        Ok(next)
    }

    pub fn add_suggested_goal(
        &self,
        suggestion: &SuggestedGoal,
        today: NaiveDate,
    ) -> Result<Self, TrackerError> {
        if self.is_added(&suggestion.id) {
            return Err(TrackerError::AlreadyAdded(suggestion.id.clone()));
        }

        let mut next = self.clone();
        // No deletion, so the next ordinal is never taken.
        let ordinal = next.goals.len() + 1;
        let id = format!("goal-{ordinal}");
        let milestones = DEFAULT_MILESTONES
            .iter()
            .enumerate()
            .map(|(i, text)| Milestone {
                id: format!("m-{ordinal}-{}", i + 1),
                text: (*text).to_string(),
                completed: false,
            })
            .collect();

        next.goals.push(Goal {
            id,
            title: suggestion.title.clone(),
            description: suggestion.description.clone(),
            due_date: today
                .checked_add_months(Months::new(SUGGESTED_GOAL_MONTHS))
                .unwrap_or(today),
            category: suggestion.category.clone(),
            priority: GoalPriority::Medium,
            status: GoalStatus::Todo,
            milestones,
        });
        next.added_suggestions.insert(suggestion.id.clone());
        Ok(next)
    }

    pub fn add_suggested_habit(&self, suggestion: &SuggestedHabit) -> Result<Self, TrackerError> {
        if self.is_added(&suggestion.id) {
            return Err(TrackerError::AlreadyAdded(suggestion.id.clone()));
        }

        let mut next = self.clone();
        let id = format!("habit-{}", next.habits.len() + 1);
        next.habits.push(Habit {
            id,
            name: suggestion.name.clone(),
            description: suggestion.description.clone(),
            frequency: suggestion.frequency,
            reminder_time: DEFAULT_REMINDER.to_string(),
            logs: Vec::new(),
        });
        next.added_suggestions.insert(suggestion.id.clone());
        Ok(next)
    }
}

fn goal_view(goal: &Goal) -> GoalView {
    GoalView {
        progress: goal.progress(),
        goal: goal.clone(),
    }
}

fn habit_view(today: NaiveDate, habit: &Habit) -> HabitView {
    HabitView {
        current_streak: calculate_streak_at(today, &habit.logs).current_streak,
        completed_today: is_completed_on(today, &habit.logs),
        habit: habit.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 14).unwrap()
    }

    #[test]
    fn toggle_milestone_returns_new_snapshot_and_awards_points() {
        let tracker = Tracker::seeded(today());
        let next = tracker.toggle_milestone("goal-1", "m-1-3").unwrap();

        assert!(!tracker.goals[0].milestones[2].completed);
        assert!(next.goals[0].milestones[2].completed);
        assert_eq!(next.goal_view("goal-1").unwrap().progress, 75);
        assert_eq!(next.user.points, tracker.user.points + MILESTONE_POINTS);

        let back = next.toggle_milestone("goal-1", "m-1-3").unwrap();
        assert!(!back.goals[0].milestones[2].completed);
        assert_eq!(back.user.points, next.user.points);
    }

    #[test]
    fn toggle_milestone_rejects_unknown_ids() {
        let tracker = Tracker::seeded(today());
        assert_eq!(
            tracker.toggle_milestone("goal-9", "m-1-1"),
            Err(TrackerError::GoalNotFound("goal-9".into()))
        );
        assert!(matches!(
            tracker.toggle_milestone("goal-1", "m-9-9"),
            Err(TrackerError::MilestoneNotFound { .. })
        ));
    }

    #[test]
    fn toggle_habit_adds_then_removes_todays_log() {
        let tracker = Tracker::seeded(today());
        let before = tracker.habit_view_at(today(), "habit-2").unwrap();
        assert!(!before.completed_today);
        assert_eq!(before.current_streak, 15);

        let done = tracker.toggle_habit_today("habit-2", today()).unwrap();
        let view = done.habit_view_at(today(), "habit-2").unwrap();
        assert!(view.completed_today);
        assert_eq!(view.current_streak, 16);
        assert_eq!(done.user.points, tracker.user.points + HABIT_POINTS);

        let undone = done.toggle_habit_today("habit-2", today()).unwrap();
        let view = undone.habit_view_at(today(), "habit-2").unwrap();
        assert!(!view.completed_today);
        assert_eq!(view.current_streak, 15);
        assert_eq!(undone.user.points, done.user.points);
        assert_eq!(undone.habits, tracker.habits);
    }

    #[test]
    fn toggle_habit_rejects_unknown_id() {
        let tracker = Tracker::seeded(today());
        assert_eq!(
            tracker.toggle_habit_today("habit-42", today()),
            Err(TrackerError::HabitNotFound("habit-42".into()))
        );
    }

    #[test]
    fn suggested_goal_is_added_once() {
        let tracker = Tracker::seeded(today());
        let suggestion = &seed::suggested_goals()[0];

        let next = tracker.add_suggested_goal(suggestion, today()).unwrap();
        let goal = next.goals.last().unwrap();
        assert_eq!(goal.id, "goal-4");
        assert_eq!(goal.title, suggestion.title);
        assert_eq!(goal.status, GoalStatus::Todo);
        assert_eq!(goal.priority, GoalPriority::Medium);
        assert_eq!(goal.due_date, NaiveDate::from_ymd_opt(2026, 7, 14).unwrap());
        assert_eq!(goal.milestones.len(), 3);
        assert_eq!(goal.progress(), 0);
        assert!(next.is_added(&suggestion.id));

        assert_eq!(
            next.add_suggested_goal(suggestion, today()),
            Err(TrackerError::AlreadyAdded(suggestion.id.clone()))
        );
    }

    #[test]
    fn suggested_habit_starts_without_logs() {
        let tracker = Tracker::seeded(today());
        let suggestion = &seed::suggested_habits()[2];

        let next = tracker.add_suggested_habit(suggestion).unwrap();
        let habit = next.habits.last().unwrap();
        assert_eq!(habit.id, "habit-4");
        assert_eq!(habit.reminder_time, DEFAULT_REMINDER);
        assert!(habit.logs.is_empty());
        assert_eq!(next.habit_view_at(today(), "habit-4").unwrap().current_streak, 0);
        assert!(next.add_suggested_habit(suggestion).is_err());
    }
}
