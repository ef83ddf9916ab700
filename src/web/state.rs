use sqlx::PgPool;
use std::sync::Arc;

use careerpress::config::Settings;
use careerpress::services::PerformanceCache;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub settings: Arc<Settings>,
    pub cache: Arc<PerformanceCache>,
}
