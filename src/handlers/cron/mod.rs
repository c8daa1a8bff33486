// handlers/cron/mod.rs - scheduler-triggered maintenance, guarded by
// require_cron_secret

use axum::extract::State;
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub inserted: u64,
    pub total: usize,
}

/// POST /api/cron/settings/seed - make sure every default setting exists
pub async fn settings_seed(State(state): State<AppState>) -> ApiResult<SeedReport> {
    let inserted = state.settings.initialize_defaults().await?;
    let total = state.settings.get_all().await?.len();

    Ok(ApiResponse::success(SeedReport { inserted, total }))
}

#[derive(Debug, Serialize)]
pub struct CronHealth {
    pub status: &'static str,
}

/// GET /api/cron/health - store reachability for the scheduler
pub async fn health(State(state): State<AppState>) -> ApiResult<CronHealth> {
    state.settings.store().health_check().await?;
    Ok(ApiResponse::success(CronHealth { status: "ok" }))
}
