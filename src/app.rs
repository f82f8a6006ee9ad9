use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits/:habit_id/toggle", post(handlers::toggle_habit_form))
        .route(
            "/goals/:goal_id/milestones/:milestone_id/toggle",
            post(handlers::toggle_milestone_form),
        )
        .route("/library/goals/:suggestion_id", post(handlers::add_suggested_goal_form))
        .route("/library/habits/:suggestion_id", post(handlers::add_suggested_habit_form))
        .route("/insights", post(handlers::request_insights_form))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/goals", get(handlers::get_goals))
        .route("/api/habits", get(handlers::get_habits))
        .route(
            "/api/goals/:goal_id/milestones/:milestone_id/toggle",
            post(handlers::toggle_milestone),
        )
        .route("/api/habits/:habit_id/toggle", post(handlers::toggle_habit))
        .route("/api/rewards", get(handlers::get_rewards))
        .route("/api/library", get(handlers::get_library))
        .route("/api/library/goals/:suggestion_id", post(handlers::add_suggested_goal))
        .route("/api/library/habits/:suggestion_id", post(handlers::add_suggested_habit))
        .route(
            "/api/insights",
            get(handlers::get_insights).post(handlers::request_insights),
        )
        .with_state(state)
}
