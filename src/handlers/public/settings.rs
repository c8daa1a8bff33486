use axum::extract::{Query, State};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::middleware::{ApiResponse, ApiResult};
use crate::settings::public_view;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    pub category: Option<String>,
}

/// GET /api/settings[?category=] - settings safe for anyone to read.
///
/// Redaction applies to every caller on this endpoint, signed-in admins
/// included; they use /api/admin/settings for the full view.
pub async fn settings_get(
    State(state): State<AppState>,
    Query(query): Query<SettingsQuery>,
) -> ApiResult<BTreeMap<String, String>> {
    let settings = state.settings.resolve().await?;
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    Ok(ApiResponse::success(public_view(&settings, category)))
}
