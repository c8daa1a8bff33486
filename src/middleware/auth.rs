use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use std::convert::Infallible;
use uuid::Uuid;

use crate::auth::{has_capability, resolve_session, Capability, Role, Session};
use crate::error::ApiError;
use crate::state::AppState;

/// Session of the current request.
///
/// Taken from the request extensions when the access gate already resolved
/// it, resolved from the headers otherwise. Never rejects.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = match parts.extensions.get::<Session>() {
            Some(session) => session.clone(),
            None => resolve_session(&parts.headers, &state.config.security),
        };
        Ok(CurrentSession(session))
    }
}

/// Authenticated caller allowed to manage settings.
///
/// For JSON API routes: answers 401/403 instead of redirecting.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = match CurrentSession::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };

        let Session::Authenticated { user_id, role } = session else {
            return Err(ApiError::unauthorized("Authentication required"));
        };

        match role {
            Some(role) if has_capability(&session, Capability::ManageSettings) => Ok(AdminSession { user_id, role }),
            _ => {
                tracing::warn!(user_id = %user_id, role = ?role, path = %parts.uri.path(), "Settings management denied");
                Err(ApiError::forbidden("Admin access required"))
            }
        }
    }
}
