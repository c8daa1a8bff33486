use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::resolve_session;
use crate::gate::{evaluate, redirect_location, GateDecision};
use crate::state::AppState;

/// Access gate applied to every request.
///
/// Resolves the session once, attaches it to the request for handlers, and
/// short-circuits admin-area requests the session may not see.
pub async fn access_gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = resolve_session(request.headers(), &state.config.security);
    let path = request.uri().path().to_string();
    let decision = evaluate(&path, &session);

    match redirect_location(&decision, &state.config.routes) {
        None => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Some(location) => {
            match decision {
                GateDecision::RedirectForbidden => tracing::warn!(
                    user_id = ?session.user_id(),
                    role = ?session.role(),
                    path = %path,
                    "Admin area denied"
                ),
                _ => tracing::debug!(path = %path, "Unauthenticated admin request, redirecting to sign-in"),
            }
            Redirect::temporary(&location).into_response()
        }
    }
}
