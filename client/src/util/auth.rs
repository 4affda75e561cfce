//! Route-guard decision shared by protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards only shape the UI. The backend still authorizes every request with
//! the bearer token, so a wrong decision here can hide data but never expose it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Role;
use crate::state::session::Session;

/// Route unauthenticated visitors are sent to.
pub const LANDING_ROUTE: &str = "/";

/// Outcome of evaluating a protected route against the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving; show a placeholder and re-evaluate later.
    Loading,
    /// Not signed in; navigate away (replacing the history entry).
    Redirect(&'static str),
    /// Signed in but the role is not on the allow-list.
    Unauthorized,
    /// Render the protected content.
    Render,
}

/// Decide what a protected route shows. An empty `allowed_roles` admits any
/// authenticated user.
pub fn guard_decision(session: &Session, allowed_roles: &[Role]) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }
    if !session.is_authenticated {
        return GuardDecision::Redirect(LANDING_ROUTE);
    }
    if !allowed_roles.is_empty() && !session.role().is_some_and(|role| allowed_roles.contains(role)) {
        return GuardDecision::Unauthorized;
    }
    GuardDecision::Render
}
