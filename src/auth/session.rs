use axum::http::{header, HeaderMap};
use uuid::Uuid;

use super::{validate_jwt, Role};
use crate::config::SecurityConfig;

/// Caller identity for one request.
///
/// Derived from the request credential on every request and passed along
/// explicitly; nothing here is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated {
        user_id: Uuid,
        /// `None` when the token carries no role or one we don't recognise
        role: Option<Role>,
    },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Session::Authenticated { user_id, .. } => Some(*user_id),
            Session::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { role, .. } => *role,
            Session::Anonymous => None,
        }
    }
}

/// Resolve the session from a bearer header or the session cookie.
///
/// Any failure (missing, malformed, bad signature, expired) yields
/// `Session::Anonymous`; the caller cannot tell which one happened.
pub fn resolve_session(headers: &HeaderMap, security: &SecurityConfig) -> Session {
    let Some(token) = bearer_token(headers).or_else(|| cookie_value(headers, &security.session_cookie))
    else {
        return Session::Anonymous;
    };

    match validate_jwt(&token, &security.jwt_secret) {
        Ok(claims) => Session::Authenticated {
            user_id: claims.sub,
            role: claims.role.and_then(|r| r.parse::<Role>().ok()),
        },
        Err(e) => {
            tracing::debug!("Session token rejected: {}", e);
            Session::Anonymous
        }
    }
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
