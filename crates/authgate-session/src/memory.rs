//! In-memory session store.

use std::sync::{PoisonError, RwLock};

use crate::{SessionStore, SessionToken};

/// A [`SessionStore`] that lives as long as the process.
///
/// Good for tests and for short-lived tools that should not leave a
/// token on disk.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<SessionToken> {
        // A poisoned lock still holds a perfectly good Option.
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: SessionToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        tracing::info!("session token stored");
    }

    fn clear(&self) {
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::info!("session token cleared");
        }
    }
}
