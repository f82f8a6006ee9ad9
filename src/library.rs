use crate::models::{SuggestedGoal, SuggestedHabit};
use crate::seed::Catalog;
use crate::tracker::Tracker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryGoal {
    #[serde(flatten)]
    pub suggestion: SuggestedGoal,
    pub added: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryHabit {
    #[serde(flatten)]
    pub suggestion: SuggestedHabit,
    pub added: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryResponse {
    pub goals: Vec<LibraryGoal>,
    pub habits: Vec<LibraryHabit>,
}

pub fn library_view(catalog: &Catalog, tracker: &Tracker) -> LibraryResponse {
    LibraryResponse {
        goals: catalog
            .suggested_goals
            .iter()
            .map(|suggestion| LibraryGoal {
                added: tracker.is_added(&suggestion.id),
                suggestion: suggestion.clone(),
            })
            .collect(),
        habits: catalog
            .suggested_habits
            .iter()
            .map(|suggestion| LibraryHabit {
                added: tracker.is_added(&suggestion.id),
                suggestion: suggestion.clone(),
            })
            .collect(),
    }
}

pub fn find_goal<'a>(catalog: &'a Catalog, suggestion_id: &str) -> Option<&'a SuggestedGoal> {
    catalog.suggested_goals.iter().find(|s| s.id == suggestion_id)
}

pub fn find_habit<'a>(catalog: &'a Catalog, suggestion_id: &str) -> Option<&'a SuggestedHabit> {
    catalog.suggested_habits.iter().find(|s| s.id == suggestion_id)
}
