//! The authentication gate.

use authgate_session::{SessionStore, SessionToken};

use crate::{Access, Route};

/// Whether a session token is stored at the moment of asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Authenticated,
    Unauthenticated,
}

/// What the view layer should do with a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Show `route`. For protected routes `authentication` is always
    /// `Some`, holding the token the view should use for its API calls.
    Render {
        route: Route,
        authentication: Option<SessionToken>,
    },

    /// Don't show `from`; go to `to` instead.
    Redirect { from: Route, to: Route },
}

impl GateDecision {
    /// The route that actually ends up on screen.
    pub fn resolved(&self) -> Route {
        match self {
            Self::Render { route, .. } => *route,
            Self::Redirect { to, .. } => *to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Result of wrapping a single view in the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    Render(V),
    Redirect(Route),
}

/// Routing guard backed by a [`SessionStore`].
///
/// Holds no state of its own. Every call reads the store afresh, so a
/// sign-in or sign-out is reflected on the very next evaluation.
#[derive(Debug, Clone)]
pub struct AuthGate<S> {
    store: S,
}

impl<S: SessionStore> AuthGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The store this gate reads from.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> GateState {
        if self.store.has() {
            GateState::Authenticated
        } else {
            GateState::Unauthenticated
        }
    }

    /// Decides whether `route` renders or redirects.
    pub fn evaluate(&self, route: Route) -> GateDecision {
        // One read: checking `has()` and then calling `get()` could see
        // two different answers if a sign-out lands in between.
        let token = self.store.get();

        match (route.access(), token) {
            (Access::Protected, Some(token)) => GateDecision::Render {
                route,
                authentication: Some(token),
            },
            (Access::Protected, None) => {
                tracing::info!(%route, "access denied, redirecting to sign-in");
                GateDecision::Redirect {
                    from: route,
                    to: Route::sign_in(),
                }
            }
            (Access::GuestOnly, Some(_)) => {
                tracing::info!(%route, "already authenticated, redirecting to landing");
                GateDecision::Redirect {
                    from: route,
                    to: Route::landing(),
                }
            }
            (Access::GuestOnly, None) => GateDecision::Render {
                route,
                authentication: None,
            },
            (Access::Public, authentication) => GateDecision::Render {
                route,
                authentication,
            },
        }
    }

    /// Renders `view` with the current token injected, or redirects to
    /// sign-in when there is none.
    pub fn protect<V>(&self, view: impl FnOnce(SessionToken) -> V) -> Guarded<V> {
        match self.store.get() {
            Some(token) => Guarded::Render(view(token)),
            None => Guarded::Redirect(Route::sign_in()),
        }
    }

    /// Renders `view` only when signed out; otherwise redirects to the
    /// landing route.
    pub fn guest_only<V>(&self, view: impl FnOnce() -> V) -> Guarded<V> {
        if self.store.has() {
            Guarded::Redirect(Route::landing())
        } else {
            Guarded::Render(view())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use authgate_session::MemorySessionStore;

    use super::*;

    fn signed_in() -> AuthGate<MemorySessionStore> {
        AuthGate::new(MemorySessionStore::with_token(SessionToken::new("T")))
    }

    fn signed_out() -> AuthGate<MemorySessionStore> {
        AuthGate::new(MemorySessionStore::new())
    }

    #[test]
    fn test_protected_route_renders_with_token_when_signed_in() {
        let decision = signed_in().evaluate(Route::Home);
        assert_eq!(
            decision,
            GateDecision::Render {
                route: Route::Home,
                authentication: Some(SessionToken::new("T")),
            }
        );
    }

    #[test]
    fn test_protected_route_redirects_to_sign_in_when_signed_out() {
        for route in [Route::Home, Route::Profile, Route::Users, Route::Circles] {
            assert_eq!(
                signed_out().evaluate(route),
                GateDecision::Redirect {
                    from: route,
                    to: Route::SignIn,
                },
                "{route:?}"
            );
        }
    }

    #[test]
    fn test_guest_only_route_redirects_when_signed_in() {
        assert_eq!(
            signed_in().evaluate(Route::SignIn),
            GateDecision::Redirect {
                from: Route::SignIn,
                to: Route::Home,
            }
        );
        assert!(signed_in().evaluate(Route::SignUp).is_redirect());
    }

    #[test]
    fn test_guest_only_route_renders_when_signed_out() {
        assert_eq!(
            signed_out().evaluate(Route::SignUp),
            GateDecision::Render {
                route: Route::SignUp,
                authentication: None,
            }
        );
    }

    #[test]
    fn test_public_route_always_renders() {
        assert!(!signed_in().evaluate(Route::NotFound).is_redirect());
        assert!(!signed_out().evaluate(Route::NotFound).is_redirect());
    }

    #[test]
    fn test_decision_is_not_cached() {
        // The gate must follow the store, not remember its last answer.
        let store = Arc::new(MemorySessionStore::new());
        let gate = AuthGate::new(Arc::clone(&store));
        assert!(gate.evaluate(Route::Profile).is_redirect());

        store.set(SessionToken::new("T"));
        assert!(!gate.evaluate(Route::Profile).is_redirect());

        store.clear();
        assert_eq!(gate.evaluate(Route::Profile).resolved(), Route::SignIn);
    }

    #[test]
    fn test_state_follows_store() {
        assert_eq!(signed_in().state(), GateState::Authenticated);
        assert_eq!(signed_out().state(), GateState::Unauthenticated);
    }

    #[test]
    fn test_protect_injects_token() {
        let guarded = signed_in().protect(|token| format!("hello {}", token.as_str()));
        assert_eq!(guarded, Guarded::Render("hello T".to_string()));
    }

    #[test]
    fn test_protect_redirects_without_building_view() {
        let guarded: Guarded<()> =
            signed_out().protect(|_| panic!("view must not be built when signed out"));
        assert_eq!(guarded, Guarded::Redirect(Route::SignIn));
    }

    #[test]
    fn test_guest_only_wrapper() {
        assert_eq!(signed_out().guest_only(|| 1), Guarded::Render(1));
        assert_eq!(signed_in().guest_only(|| 1), Guarded::Redirect(Route::Home));
    }
}
