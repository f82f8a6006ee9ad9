//! Data the dashboard starts from. Habit log dates and goal due dates are
//! placed relative to the day the server starts.

use crate::models::{
    Badge, Goal, GoalPriority, GoalStatus, Habit, HabitFrequency, HabitLog, Milestone,
    SuggestedGoal, SuggestedHabit, User,
};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Static reference data that never changes while the server runs.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub badges: Vec<Badge>,
    pub suggested_goals: Vec<SuggestedGoal>,
    pub suggested_habits: Vec<SuggestedHabit>,
}

impl Catalog {
    pub fn seeded() -> Self {
        Self {
            badges: badges(),
            suggested_goals: suggested_goals(),
            suggested_habits: suggested_habits(),
        }
    }
}

pub fn badges() -> Vec<Badge> {
    [
        ("badge-1", "Beginner", "Start your journey.", "🚀"),
        ("badge-2", "Consistent", "Complete a habit 7 days in a row.", "🗓️"),
        ("badge-3", "Finisher", "Complete your first goal.", "🏆"),
        ("badge-4", "Punctual", "Earn 500 points.", "💯"),
        ("badge-5", "Strategist", "Have 5 active goals.", "🗺️"),
        ("badge-6", "Habit Master", "Have 5 active habits.", "🧘"),
        ("badge-7", "Rocket", "Complete 3 goals in a month.", "☄️"),
        ("badge-8", "Visionary", "Earn 2000 points.", "✨"),
    ]
    .into_iter()
    .map(|(id, name, description, icon)| Badge {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
    })
    .collect()
}

pub fn user() -> User {
    User {
        id: "user-1".into(),
        username: "Alex".into(),
        email: "alex@example.com".into(),
        points: 275,
        badges: vec!["badge-1".into(), "badge-3".into()],
    }
}

pub fn goals(today: NaiveDate) -> Vec<Goal> {
    let month_start = today.with_day(1).unwrap_or(today);
    let year_end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);

    vec![
        Goal {
            id: "goal-1".into(),
            title: "Learn advanced Rust".into(),
            description: "Get comfortable with traits, lifetimes and async.".into(),
            due_date: month_start
                .checked_add_months(Months::new(2))
                .and_then(|d| d.with_day(15))
                .unwrap_or(today),
            category: "Personal growth".into(),
            priority: GoalPriority::High,
            status: GoalStatus::InProgress,
            milestones: milestones(
                "m-1",
                &[
                    ("Finish the ownership chapter", true),
                    ("Build a project with traits", true),
                    ("Study async runtimes", false),
                    ("Write a procedural macro", false),
                ],
            ),
        },
        Goal {
            id: "goal-2".into(),
            title: "Run a 5k".into(),
            description: "Train consistently until a 5k run without stopping.".into(),
            due_date: month_start
                .checked_add_months(Months::new(3))
                .unwrap_or(today),
            category: "Health & fitness".into(),
            priority: GoalPriority::Medium,
            status: GoalStatus::Todo,
            milestones: milestones(
                "m-2",
                &[
                    ("Buy running shoes", true),
                    ("Run 1km without stopping", false),
                    ("Run 3km without stopping", false),
                    ("Run 5km without stopping", false),
                ],
            ),
        },
        Goal {
            id: "goal-3".into(),
            title: "Read 12 books this year".into(),
            description: "Keep the reading habit going with one book a month.".into(),
            due_date: year_end,
            category: "Personal growth".into(),
            priority: GoalPriority::Low,
            status: GoalStatus::Done,
            milestones: (1..=12)
                .map(|i| Milestone {
                    id: format!("m-3-{i}"),
                    text: format!("Read book {i}"),
                    completed: i <= 5,
                })
                .collect(),
        },
    ]
}

pub fn habits(today: NaiveDate) -> Vec<Habit> {
    vec![
        Habit {
            id: "habit-1".into(),
            name: "Meditate for 10 minutes".into(),
            description: "Practice mindfulness to sharpen focus and reduce stress.".into(),
            frequency: HabitFrequency::Daily,
            reminder_time: "07:00".into(),
            logs: days_ago(today, &[5, 4, 3, 1]),
        },
        Habit {
            id: "habit-2".into(),
            name: "Study English".into(),
            description: "Do one lesson in a language app.".into(),
            frequency: HabitFrequency::Daily,
            reminder_time: "20:00".into(),
            logs: days_ago(today, &(1..=15i64).collect::<Vec<_>>()),
        },
        Habit {
            id: "habit-3".into(),
            name: "Go to the gym".into(),
            description: "Strength-focused workout.".into(),
            frequency: HabitFrequency::Weekly,
            reminder_time: "18:00".into(),
            logs: days_ago(today, &[8, 2]),
        },
    ]
}

pub fn suggested_habits() -> Vec<SuggestedHabit> {
    [
        ("sh-1", "Drink 2L of water", "Stay hydrated through the day for more energy.", "Health"),
        ("sh-2", "Read 10 pages", "Grow a daily reading habit.", "Personal growth"),
        ("sh-3", "Walk for 30 minutes", "A daily walk for heart health and mood.", "Health & fitness"),
        ("sh-4", "Plan tomorrow", "Organize tomorrow's tasks each evening.", "Productivity"),
        ("sh-5", "Practice gratitude", "Write down three things you are grateful for.", "Wellbeing"),
        ("sh-6", "Study a language for 15 minutes", "Learn vocabulary or do a quick lesson.", "Learning"),
    ]
    .into_iter()
    .map(|(id, name, description, category)| SuggestedHabit {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category: category.into(),
        frequency: HabitFrequency::Daily,
    })
    .collect()
}

pub fn suggested_goals() -> Vec<SuggestedGoal> {
    [
        ("sg-1", "Cook 5 new dishes", "Broaden your cooking skills and home meal options.", "Lifestyle"),
        ("sg-2", "Sort out the wardrobe", "Set aside clothes to donate and free up space.", "Organization"),
        ("sg-3", "Set a monthly budget", "Track spending to save toward financial goals.", "Finance"),
        ("sg-4", "Take an online course", "Pick up a new skill or go deeper in an interest.", "Career"),
        ("sg-5", "Grow a herb garden", "Grow your own herbs for the kitchen.", "Hobbies"),
        ("sg-6", "Visit somewhere new in town", "Explore parks and sights in your own city.", "Leisure"),
    ]
    .into_iter()
    .map(|(id, title, description, category)| SuggestedGoal {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: category.into(),
    })
    .collect()
}

fn days_ago(today: NaiveDate, offsets: &[i64]) -> Vec<HabitLog> {
    offsets
        .iter()
        .map(|offset| HabitLog {
            date: today - Duration::days(*offset),
        })
        .collect()
}

fn milestones(prefix: &str, items: &[(&str, bool)]) -> Vec<Milestone> {
    items
        .iter()
        .enumerate()
        .map(|(i, (text, completed))| Milestone {
            id: format!("{prefix}-{}", i + 1),
            text: (*text).into(),
            completed: *completed,
        })
        .collect()
}
