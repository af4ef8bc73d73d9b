//! Route guarding driven by the session state.

use storefront_entity::session::SessionState;

/// Navigation intent produced by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The current route is allowed.
    Stay,
    /// Move to the given route.
    Redirect(String),
}

/// Keeps signed-out users on the login route and signed-in users off it.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_route: String,
    home_route: String,
}

impl RouteGuard {
    /// Create a guard for the given public login route and protected root.
    pub fn new(login_route: impl Into<String>, home_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
            home_route: home_route.into(),
        }
    }

    /// The public login route.
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Root of the protected area.
    pub fn home_route(&self) -> &str {
        &self.home_route
    }

    /// Decide where `route` should lead in `state`.
    ///
    /// Every redirect target is itself a `Stay` for the same state.
    pub fn decide(&self, state: SessionState, route: &str) -> Navigation {
        let on_login = route == self.login_route;
        match state {
            SessionState::Unauthenticated if !on_login => {
                Navigation::Redirect(self.login_route.clone())
            }
            SessionState::Authenticated | SessionState::Refreshing if on_login => {
                Navigation::Redirect(self.home_route.clone())
            }
            _ => Navigation::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> RouteGuard {
        RouteGuard::new("/login", "/dashboard")
    }

    #[test]
    fn test_signed_out_is_sent_to_login() {
        let nav = guard().decide(SessionState::Unauthenticated, "/categories");
        assert_eq!(nav, Navigation::Redirect("/login".to_string()));
        assert_eq!(
            guard().decide(SessionState::Unauthenticated, "/login"),
            Navigation::Stay
        );
    }

    #[test]
    fn test_signed_in_leaves_login() {
        for state in [SessionState::Authenticated, SessionState::Refreshing] {
            assert_eq!(
                guard().decide(state, "/login"),
                Navigation::Redirect("/dashboard".to_string())
            );
            assert_eq!(guard().decide(state, "/categories"), Navigation::Stay);
        }
    }

    #[test]
    fn test_authenticating_stays() {
        assert_eq!(
            guard().decide(SessionState::Authenticating, "/login"),
            Navigation::Stay
        );
        assert_eq!(
            guard().decide(SessionState::Authenticating, "/dashboard"),
            Navigation::Stay
        );
    }

    #[test]
    fn test_redirect_targets_are_stable() {
        let guard = guard();
        let states = [
            SessionState::Unauthenticated,
            SessionState::Authenticating,
            SessionState::Authenticated,
            SessionState::Refreshing,
        ];
        for state in states {
            for route in ["/login", "/dashboard", "/categories/new"] {
                if let Navigation::Redirect(target) = guard.decide(state, route) {
                    assert_eq!(guard.decide(state, &target), Navigation::Stay);
                }
            }
        }
    }
}
