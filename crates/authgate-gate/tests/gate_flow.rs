//! Integration tests for the gate over real session backends.
//!
//! The gate only sees the `SessionStore` trait, so the same checks run
//! against the in-memory store and the file-backed one.

use std::sync::Arc;

use authgate_gate::{Access, AuthGate, GateDecision, Navigator, Route};
use authgate_session::{
    FileSessionStore, MemorySessionStore, SessionConfig, SessionStore, SessionToken,
};

fn protected_routes() -> impl Iterator<Item = Route> {
    Route::ALL
        .into_iter()
        .filter(|r| r.access() == Access::Protected)
}

/// After `clear()`, every protected route redirects to sign-in, no matter
/// what the store held before.
fn assert_clear_locks_everything<S: SessionStore>(store: S) {
    let store = Arc::new(store);
    let gate = AuthGate::new(Arc::clone(&store));

    for prior in [None, Some("T"), Some("U")] {
        if let Some(token) = prior {
            store.set(SessionToken::new(token));
        }
        store.clear();

        for route in protected_routes() {
            assert_eq!(
                gate.evaluate(route),
                GateDecision::Redirect {
                    from: route,
                    to: Route::SignIn,
                },
                "{route:?} after clearing {prior:?}"
            );
        }
    }
}

#[test]
fn test_clear_locks_protected_routes_memory() {
    assert_clear_locks_everything(MemorySessionStore::new());
}

#[test]
fn test_clear_locks_protected_routes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store =
        FileSessionStore::open(dir.path().join("jar.json"), SessionConfig::default()).unwrap();
    assert_clear_locks_everything(store);
}

#[test]
fn test_token_written_by_one_handle_is_seen_by_another() {
    // Two handles on the same jar file behave like two tabs sharing a
    // cookie: a sign-in in one unlocks the gate in the other.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jar.json");
    let writer = FileSessionStore::open(&path, SessionConfig::default()).unwrap();
    let gate = AuthGate::new(FileSessionStore::open(&path, SessionConfig::default()).unwrap());
    assert!(gate.evaluate(Route::Home).is_redirect());

    writer.set(SessionToken::new("T"));

    assert_eq!(
        gate.evaluate(Route::Home),
        GateDecision::Render {
            route: Route::Home,
            authentication: Some(SessionToken::new("T")),
        }
    );
}

#[test]
fn test_full_session_walkthrough() {
    // Anonymous visitor → bounced to sign-in → signs in → lands home →
    // browses → signs out → bounced again.
    let store = Arc::new(MemorySessionStore::new());
    let mut nav = Navigator::new(AuthGate::new(Arc::clone(&store)), "/users");
    assert_eq!(nav.current(), Route::SignIn);

    nav.navigate("/signup");
    assert_eq!(nav.current(), Route::SignUp);
    nav.navigate("/signin");

    store.set(SessionToken::new("T"));
    nav.refresh();
    assert_eq!(nav.current(), Route::Home);

    let decision = nav.navigate("/profile");
    assert_eq!(
        decision,
        GateDecision::Render {
            route: Route::Profile,
            authentication: Some(SessionToken::new("T")),
        }
    );

    store.clear();
    nav.refresh();
    assert_eq!(nav.current(), Route::SignIn);
    assert!(nav.navigate("/circles").is_redirect());
}
