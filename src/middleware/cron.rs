use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

use crate::auth::session::bearer_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Gate for scheduler-triggered endpoints: `Authorization: Bearer <CRON_SECRET>`.
///
/// An unset secret locks the endpoints entirely. The body never says which
/// part of the check failed.
pub async fn require_cron_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let expected = &state.config.security.cron_secret;
    let authorized = match bearer_token(request.headers()) {
        Some(presented) => secrets_match(&presented, expected),
        None => false,
    };

    if !authorized {
        tracing::warn!(path = %request.uri().path(), "Rejected cron request");
        return ApiError::unauthorized("Unauthorized").into_response();
    }

    next.run(request).await
}

// Digests have equal length, so the comparison does not depend on where
// the presented secret diverges.
fn secrets_match(presented: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
