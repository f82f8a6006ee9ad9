pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod insights;
pub mod library;
pub mod models;
pub mod rewards;
pub mod seed;
pub mod state;
pub mod stats;
pub mod streak;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use stats::{compute_recent_activity, compute_stats};
pub use streak::{calculate_streak, is_completed_today};
pub use tracker::Tracker;
