//! Navigator: the current route plus a back-stack, gated on every move.
//!
//! The flow for each navigation is: request → gate → record → show.
//! Redirects replace the requested route in place, so going "back" never
//! lands on a page the user was bounced away from.

use authgate_session::SessionStore;

use crate::{AuthGate, GateDecision, GateError, Route};

/// Tracks where the user is and where they've been.
#[derive(Debug)]
pub struct Navigator<S> {
    gate: AuthGate<S>,
    current: Route,
    history: Vec<Route>,
}

impl<S: SessionStore> Navigator<S> {
    /// Starts at `initial_path`, gating it like any other navigation.
    pub fn new(gate: AuthGate<S>, initial_path: &str) -> Self {
        let decision = gate.evaluate(Route::from_path(initial_path));
        Self {
            current: decision.resolved(),
            gate,
            history: Vec::new(),
        }
    }

    /// The route currently on screen.
    pub fn current(&self) -> Route {
        self.current
    }

    /// How many entries `back()` can still pop.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn gate(&self) -> &AuthGate<S> {
        &self.gate
    }

    /// Navigates to `path`, pushing the current route onto the history.
    pub fn navigate(&mut self, path: &str) -> GateDecision {
        let decision = self.gate.evaluate(Route::from_path(path));
        let next = decision.resolved();

        if next != self.current {
            self.history.push(self.current);
        }
        self.current = next;

        tracing::debug!(path, route = %next, depth = self.history.len(), "navigated");
        decision
    }

    /// Pops the previous route and gates it again, since the session may
    /// have changed since it was last shown.
    ///
    /// # Errors
    /// Returns [`GateError::NoHistory`] when there is nothing to go back to.
    pub fn back(&mut self) -> Result<GateDecision, GateError> {
        let previous = self.history.pop().ok_or(GateError::NoHistory)?;
        let decision = self.gate.evaluate(previous);
        self.current = decision.resolved();
        Ok(decision)
    }

    /// Re-gates the current route in place.
    ///
    /// Call after signing in or out so a now-forbidden page is left
    /// immediately.
    pub fn refresh(&mut self) -> GateDecision {
        let decision = self.gate.evaluate(self.current);
        self.current = decision.resolved();
        decision
    }
}
