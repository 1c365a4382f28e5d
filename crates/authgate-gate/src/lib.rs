//! Route gating for Authgate.
//!
//! Decides, on every navigation, whether the requested view may render
//! or whether the user gets bounced somewhere else. The decision is a
//! pure function of the route and "is a session token stored right now?".
//! Nothing is cached between navigations.
//!
//! # Key types
//!
//! - [`Route`] / [`Access`]: the route table and each route's access rule
//! - [`AuthGate`]: evaluates a route against the session store
//! - [`GateDecision`]: render (with the token injected) or redirect
//! - [`Navigator`]: current route plus back-stack, gated on every move

mod error;
mod gate;
mod navigator;
mod route;

pub use error::GateError;
pub use gate::{AuthGate, GateDecision, GateState, Guarded};
pub use navigator::Navigator;
pub use route::{Access, Route};
