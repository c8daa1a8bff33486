// handlers/public/pages.rs - landing, sign-in and forbidden pages

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Blog CMS",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health (public)",
                "settings": "/api/settings[?category=] (public, redacted)",
                "signin": "/auth/signin (public)",
                "admin": "/admin/* (admin session)",
                "admin_api": "/api/admin/settings[/:key] (admin session)",
                "cron": "/api/cron/* (cron bearer secret)",
            }
        }
    }))
}

#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Only same-site relative paths survive; anything else falls back to `/`
pub fn safe_callback(callback_url: Option<&str>) -> &str {
    match callback_url {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.contains('\\') => url,
        _ => "/",
    }
}

/// GET /auth/signin - where the access gate sends anonymous admin requests.
///
/// Credential checking belongs to the identity provider; this echoes the
/// destination the caller should return to once signed in.
pub async fn signin_page(State(state): State<AppState>, Query(query): Query<SignInQuery>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "message": "Sign in to continue",
            "callbackUrl": safe_callback(query.callback_url.as_deref()),
            "cookie": state.config.security.session_cookie,
        }
    }))
}

/// GET /forbidden - where the access gate sends signed-in non-admins
pub async fn forbidden_page() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "success": false,
            "error": "You do not have access to this page",
            "code": "FORBIDDEN"
        })),
    )
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Page not found")
}
