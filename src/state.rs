use crate::insights::{InsightClient, InsightState};
use crate::seed::Catalog;
use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
    pub insights: Arc<Mutex<InsightState>>,
    pub insight_client: Arc<InsightClient>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(tracker: Tracker, catalog: Catalog, insight_client: InsightClient) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            insights: Arc::new(Mutex::new(InsightState::default())),
            insight_client: Arc::new(insight_client),
            catalog: Arc::new(catalog),
        }
    }
}
