//! The `SessionStore` contract.

use std::sync::Arc;

use crate::SessionToken;

/// Reads and writes the single session token.
///
/// All methods take `&self`: the store is shared between the API client
/// (which writes after sign-in) and the auth gate (which reads on every
/// navigation), so implementations use interior mutability.
///
/// There are no error returns. Storage is treated as always succeeding;
/// a backend that does hit an I/O problem logs it and carries on, and the
/// worst case is that the user has to sign in again.
///
/// Concurrent writers are last-write-wins. There is only ever one
/// "current session" per store, so nothing finer-grained is needed.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the stored token, or `None` if there isn't one.
    fn get(&self) -> Option<SessionToken>;

    /// Stores `token`, replacing any previous one.
    fn set(&self, token: SessionToken);

    /// Removes the stored token. A no-op if there isn't one.
    fn clear(&self);

    /// Returns `true` iff a token is currently stored.
    fn has(&self) -> bool {
        self.get().is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self) -> Option<SessionToken> {
        (**self).get()
    }

    fn set(&self, token: SessionToken) {
        (**self).set(token);
    }

    fn clear(&self) {
        (**self).clear();
    }

    fn has(&self) -> bool {
        (**self).has()
    }
}
