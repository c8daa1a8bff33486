// handlers/admin/dashboard.rs - admin area pages behind the access gate

use axum::extract::State;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult, CurrentSession};
use crate::settings::{group_by_category, Setting};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user_id: Option<Uuid>,
    pub role: Option<String>,
    pub store: &'static str,
    pub setting_count: usize,
    pub categories: BTreeMap<String, usize>,
}

/// GET /admin - overview of the settings store
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<Dashboard> {
    let store = state.settings.store().clone();
    let (settings, ()) = futures::try_join!(state.settings.resolve(), store.health_check())?;

    let categories = group_by_category(&settings)
        .into_iter()
        .map(|(category, entries)| (category, entries.len()))
        .collect();

    Ok(ApiResponse::success(Dashboard {
        user_id: session.user_id(),
        role: session.role().map(|r| r.to_string()),
        store: "ok",
        setting_count: settings.len(),
        categories,
    }))
}

#[derive(Debug, Serialize)]
pub struct SettingsPage {
    pub categories: BTreeMap<String, BTreeMap<String, String>>,
    pub settings: Vec<Setting>,
}

/// GET /admin/settings - unfiltered settings grouped by category
pub async fn settings_page(State(state): State<AppState>) -> ApiResult<SettingsPage> {
    let settings = state.settings.resolve().await?;

    Ok(ApiResponse::success(SettingsPage {
        categories: group_by_category(&settings),
        settings,
    }))
}
