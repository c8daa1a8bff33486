//! Access gate: decides whether a request reaches its handler, is sent to
//! sign-in, or is sent to the forbidden page.
//!
//! One rule, one prefix. Authentication is checked before authorization so
//! an anonymous caller is always sent to sign-in, whatever its role data.

use url::form_urlencoded;

use crate::auth::{has_capability, Capability, Session};
use crate::config::RoutesConfig;

/// Every path starting with this is admin-protected
pub const ADMIN_PREFIX: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    AdminProtected,
}

pub fn classify(path: &str) -> RouteClass {
    if path.starts_with(ADMIN_PREFIX) {
        RouteClass::AdminProtected
    } else {
        RouteClass::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectSignIn { callback_url: String },
    RedirectForbidden,
}

pub fn evaluate(path: &str, session: &Session) -> GateDecision {
    match classify(path) {
        RouteClass::Public => GateDecision::Allow,
        RouteClass::AdminProtected if !session.is_authenticated() => GateDecision::RedirectSignIn {
            callback_url: path.to_string(),
        },
        RouteClass::AdminProtected if has_capability(session, Capability::AdminArea) => GateDecision::Allow,
        RouteClass::AdminProtected => GateDecision::RedirectForbidden,
    }
}

/// `Location` for a redirect decision; `None` for `Allow`
pub fn redirect_location(decision: &GateDecision, routes: &RoutesConfig) -> Option<String> {
    match decision {
        GateDecision::Allow => None,
        GateDecision::RedirectSignIn { callback_url } => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("callbackUrl", callback_url)
                .finish();
            Some(format!("{}?{}", routes.signin_path, query))
        }
        GateDecision::RedirectForbidden => Some(routes.forbidden_path.clone()),
    }
}
