use crate::models::{Badge, User};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Awarded when a milestone goes from open to completed.
pub const MILESTONE_POINTS: u64 = 25;
/// Awarded when today's log is added to a habit.
pub const HABIT_POINTS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeStatus {
    #[serde(flatten)]
    pub badge: Badge,
    pub earned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RewardsResponse {
    pub points: u64,
    pub badges: Vec<BadgeStatus>,
}

pub fn badge_board(user: &User, badges: &[Badge]) -> Vec<BadgeStatus> {
    let held: HashSet<&str> = user.badges.iter().map(String::as_str).collect();
    badges
        .iter()
        .map(|badge| BadgeStatus {
            earned: held.contains(badge.id.as_str()),
            badge: badge.clone(),
        })
        .collect()
}

pub fn rewards(user: &User, badges: &[Badge]) -> RewardsResponse {
    RewardsResponse {
        points: user.points,
        badges: badge_board(user, badges),
    }
}
