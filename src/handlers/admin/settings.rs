// handlers/admin/settings.rs - settings management API (JSON, admin only)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::settings::{validate_update, Setting, SettingUpdate};
use crate::state::AppState;

/// GET /api/admin/settings - every setting with its metadata
pub async fn settings_list(State(state): State<AppState>, _admin: AdminSession) -> ApiResult<Vec<Setting>> {
    let settings = state.settings.resolve().await?;
    Ok(ApiResponse::success(settings))
}

/// GET /api/admin/settings/:key
pub async fn setting_get(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(key): Path<String>,
) -> ApiResult<Setting> {
    let setting = state.settings.get(&key).await?;
    Ok(ApiResponse::success(setting))
}

#[derive(Debug, Deserialize)]
pub struct SettingsUpdateRequest {
    pub settings: Vec<SettingUpdate>,
}

/// PUT /api/admin/settings - validated bulk write
///
/// ```json
/// { "settings": [ { "key": "siteTitle", "value": "Notes", "category": "general" } ] }
/// ```
pub async fn settings_put(
    State(state): State<AppState>,
    admin: AdminSession,
    payload: Result<Json<SettingsUpdateRequest>, JsonRejection>,
) -> ApiResult<Vec<Setting>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e.body_text())))?;

    validate_update(&request.settings)
        .map_err(|field_errors| ApiError::validation_error("Invalid settings", Some(field_errors)))?;

    tracing::info!(user_id = %admin.user_id, count = request.settings.len(), "Admin settings update");
    let written = state.settings.apply_updates(request.settings).await?;

    Ok(ApiResponse::success(written))
}
