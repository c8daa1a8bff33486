use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{admin, cron, public};
use crate::middleware::{access_gate_middleware, require_cron_secret};
use crate::state::AppState;

/// Full router. The access gate wraps every route.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(admin_page_routes())
        .merge(admin_api_routes())
        .merge(cron_routes(state.clone()))
        .fallback(public::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), access_gate_middleware))
        .layer(CorsLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/auth/signin", get(public::signin_page))
        .route("/forbidden", get(public::forbidden_page))
        .route("/api/settings", get(public::settings_get))
}

fn admin_page_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/settings", get(admin::settings_page))
}

fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/settings",
            get(admin::settings_list).put(admin::settings_put),
        )
        .route("/api/admin/settings/:key", get(admin::setting_get))
}

fn cron_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/cron/settings/seed", post(cron::settings_seed))
        .route("/api/cron/health", get(cron::health))
        .route_layer(middleware::from_fn_with_state(state, require_cron_secret))
}
