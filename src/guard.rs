use crate::models::Role;
use crate::session::SessionSnapshot;

/// RouteDecision
///
/// The outcome of evaluating a protected view against the session state.
/// Redirects carry everything the routing layer needs; nothing here is an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Startup verification is still in flight: show a neutral placeholder,
    /// never a premature redirect.
    Pending,
    /// Render the requested view.
    Allow,
    /// Anonymous visitor on a protected view: send to the login entry
    /// point, remembering where they were headed.
    RedirectToLogin {
        /// The originally requested location, so the caller can return
        /// there after authentication.
        from: String,
    },
    /// Authenticated but under-privileged: send to the default
    /// authenticated landing page, never back to login.
    RedirectToDashboard,
}

/// evaluate
///
/// Pure decision function gating a protected view. Holds no state of its
/// own; callers re-evaluate it on every navigation and on every session
/// change.
///
/// Order matters: the loading check precedes the user check (no
/// flash-redirect before the startup verification resolves), and the role
/// check only runs for a present user.
pub fn evaluate(
    session: &SessionSnapshot,
    required_role: Option<Role>,
    location: &str,
) -> RouteDecision {
    if session.loading {
        return RouteDecision::Pending;
    }

    let Some(user) = &session.user else {
        return RouteDecision::RedirectToLogin {
            from: location.to_string(),
        };
    };

    if let Some(required) = required_role {
        if !user.role.satisfies(required) {
            return RouteDecision::RedirectToDashboard;
        }
    }

    RouteDecision::Allow
}

/// Whether a user holding `role` may enter a view requiring `required`.
/// An unspecified requirement admits every authenticated user.
pub fn has_access(role: Role, required: Option<Role>) -> bool {
    match required {
        Some(required) => role.satisfies(required),
        None => true,
    }
}
