//! Route guard decision for protected pages.

use crate::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";

/// What a protected route shows for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth still resolving: show the placeholder, never the protected content.
    Placeholder,
    /// Anonymous: replace the history entry with the login route.
    Redirect(&'static str),
    Render,
}

/// Placeholder text while the session is being resolved.
pub const PLACEHOLDER_TEXT: &str = "Loading authentication...";

#[must_use]
pub fn decide(state: &AuthState) -> GuardDecision {
    if !state.is_resolved() {
        GuardDecision::Placeholder
    } else if state.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn unresolved_state_shows_placeholder() {
        assert_eq!(decide(&AuthState::default()), GuardDecision::Placeholder);
        assert_eq!(decide(&AuthState::loading()), GuardDecision::Placeholder);
    }

    #[test]
    fn anonymous_redirects_to_login() {
        assert_eq!(decide(&AuthState::resolved(None)), GuardDecision::Redirect("/login"));
    }

    #[test]
    fn authenticated_renders() {
        let state = AuthState::resolved(Some(testkit::session("u1", "a@example.com")));
        assert_eq!(decide(&state), GuardDecision::Render);
    }
}
