use crate::errors::AppError;
use crate::insights::InsightState;
use crate::library::{self, LibraryResponse};
use crate::models::{
    GoalToggleResponse, GoalView, HabitToggleResponse, HabitView, StatsResponse,
};
use crate::rewards::{self, RewardsResponse};
use crate::state::AppState;
use crate::stats::{
    compute_recent_activity_at, compute_stats_at, in_progress_goals, IN_PROGRESS_LIMIT,
    RECENT_ACTIVITY_DAYS,
};
use crate::streak::today;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await.clone();
    let insights = state.insights.lock().await.clone();
    Html(render_index(today(), &tracker, &state.catalog, &insights))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let today = today();
    let tracker = state.tracker.lock().await;
    Json(StatsResponse {
        stats: compute_stats_at(today, &tracker.goals, &tracker.habits),
        recent_activity: compute_recent_activity_at(today, &tracker.habits, RECENT_ACTIVITY_DAYS),
        in_progress: in_progress_goals(&tracker.goals, IN_PROGRESS_LIMIT),
    })
}

pub async fn get_goals(State(state): State<AppState>) -> Json<Vec<GoalView>> {
    Json(state.tracker.lock().await.goal_views())
}

pub async fn get_habits(State(state): State<AppState>) -> Json<Vec<HabitView>> {
    Json(state.tracker.lock().await.habit_views_at(today()))
}

pub async fn get_rewards(State(state): State<AppState>) -> Json<RewardsResponse> {
    let tracker = state.tracker.lock().await;
    Json(rewards::rewards(&tracker.user, &state.catalog.badges))
}

pub async fn get_library(State(state): State<AppState>) -> Json<LibraryResponse> {
    let tracker = state.tracker.lock().await;
    Json(library::library_view(&state.catalog, &tracker))
}

pub async fn toggle_milestone(
    State(state): State<AppState>,
    Path((goal_id, milestone_id)): Path<(String, String)>,
) -> Result<Json<GoalToggleResponse>, AppError> {
    Ok(Json(apply_milestone_toggle(&state, &goal_id, &milestone_id).await?))
}

pub async fn toggle_milestone_form(
    State(state): State<AppState>,
    Path((goal_id, milestone_id)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    apply_milestone_toggle(&state, &goal_id, &milestone_id).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
) -> Result<Json<HabitToggleResponse>, AppError> {
    Ok(Json(apply_habit_toggle(&state, &habit_id).await?))
}

pub async fn toggle_habit_form(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_habit_toggle(&state, &habit_id).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_suggested_goal(
    State(state): State<AppState>,
    Path(suggestion_id): Path<String>,
) -> Result<(StatusCode, Json<GoalView>), AppError> {
    let view = apply_add_goal(&state, &suggestion_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn add_suggested_goal_form(
    State(state): State<AppState>,
    Path(suggestion_id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_add_goal(&state, &suggestion_id).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_suggested_habit(
    State(state): State<AppState>,
    Path(suggestion_id): Path<String>,
) -> Result<(StatusCode, Json<HabitView>), AppError> {
    let view = apply_add_habit(&state, &suggestion_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn add_suggested_habit_form(
    State(state): State<AppState>,
    Path(suggestion_id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_add_habit(&state, &suggestion_id).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_insights(State(state): State<AppState>) -> Json<InsightState> {
    Json(state.insights.lock().await.clone())
}

pub async fn request_insights(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<InsightState>), AppError> {
    let current = start_insights(&state).await?;
    let status = if current.is_pending() {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(current)))
}

pub async fn request_insights_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    start_insights(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_milestone_toggle(
    state: &AppState,
    goal_id: &str,
    milestone_id: &str,
) -> Result<GoalToggleResponse, AppError> {
    let mut tracker = state.tracker.lock().await;
    let next = tracker.toggle_milestone(goal_id, milestone_id)?;
    *tracker = next;

    let goal = tracker
        .goal_view(goal_id)
        .ok_or_else(|| AppError::not_found(format!("goal '{goal_id}' not found")))?;
    info!(goal_id, milestone_id, progress = goal.progress, "milestone toggled");
    Ok(GoalToggleResponse {
        goal,
        points: tracker.user.points,
    })
}

async fn apply_habit_toggle(state: &AppState, habit_id: &str) -> Result<HabitToggleResponse, AppError> {
    let today = today();
    let mut tracker = state.tracker.lock().await;
    let next = tracker.toggle_habit_today(habit_id, today)?;
    *tracker = next;

    let habit = tracker
        .habit_view_at(today, habit_id)
        .ok_or_else(|| AppError::not_found(format!("habit '{habit_id}' not found")))?;
    info!(
        habit_id,
        completed_today = habit.completed_today,
        streak = habit.current_streak,
        "habit toggled"
    );
    Ok(HabitToggleResponse {
        habit,
        points: tracker.user.points,
    })
}

async fn apply_add_goal(state: &AppState, suggestion_id: &str) -> Result<GoalView, AppError> {
    let suggestion = library::find_goal(&state.catalog, suggestion_id)
        .ok_or_else(|| AppError::not_found(format!("suggested goal '{suggestion_id}' not found")))?;

    let mut tracker = state.tracker.lock().await;
    let next = tracker.add_suggested_goal(suggestion, today())?;
    *tracker = next;

    let view = tracker
        .goal_views()
        .pop()
        .ok_or_else(|| AppError::not_found("goal list is empty"))?;
    info!(goal_id = %view.goal.id, suggestion = %suggestion_id, "added suggested goal");
    Ok(view)
}

async fn apply_add_habit(state: &AppState, suggestion_id: &str) -> Result<HabitView, AppError> {
    let suggestion = library::find_habit(&state.catalog, suggestion_id)
        .ok_or_else(|| AppError::not_found(format!("suggested habit '{suggestion_id}' not found")))?;

    let mut tracker = state.tracker.lock().await;
    let next = tracker.add_suggested_habit(suggestion)?;
    *tracker = next;

    let view = tracker
        .habit_views_at(today())
        .pop()
        .ok_or_else(|| AppError::not_found("habit list is empty"))?;
    info!(habit_id = %view.habit.id, suggestion = %suggestion_id, "added suggested habit");
    Ok(view)
}

/// Moves the panel to `Pending` and spawns the provider call on a snapshot of
/// the lists. Without a credential the request settles immediately.
async fn start_insights(state: &AppState) -> Result<InsightState, AppError> {
    let (goals, habits) = {
        let tracker = state.tracker.lock().await;
        (tracker.goals.clone(), tracker.habits.clone())
    };

    let mut insights = state.insights.lock().await;
    if insights.is_pending() {
        return Err(AppError::conflict("an insight request is already in progress"));
    }

    if !state.insight_client.has_credential() {
        let result = state.insight_client.generate_insights(&goals, &habits).await;
        if let Err(err) = &result {
            warn!("insight request rejected: {err}");
        }
        *insights = InsightState::settle(result);
        return Ok(insights.clone());
    }

    *insights = InsightState::Pending;
    let client = Arc::clone(&state.insight_client);
    let slot = Arc::clone(&state.insights);
    tokio::spawn(async move {
        let result = client.generate_insights(&goals, &habits).await;
        match &result {
            Ok(text) => info!(chars = text.len(), "insights ready"),
            Err(err) => error!("insight request failed: {err}"),
        }
        *slot.lock().await = InsightState::settle(result);
    });

    info!("insight request started");
    Ok(InsightState::Pending)
}
