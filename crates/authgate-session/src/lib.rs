//! Session token storage for Authgate.
//!
//! This crate owns the one piece of durable client state: the opaque
//! session token the API hands out on a successful sign-in.
//!
//! 1. **The token**: [`SessionToken`], a newtype that never prints itself
//! 2. **The contract**: [`SessionStore`]: `has`, `get`, `set`, `clear`
//! 3. **Backends**: [`MemorySessionStore`] (process-local) and
//!    [`FileSessionStore`] (durable, cookie-jar style)
//!
//! # How it fits in the stack
//!
//! ```text
//! Client (above)  ← writes the token after a successful authenticate
//! Gate (above)    ← reads the token on every route evaluation
//!     ↕
//! Session Layer (this crate)  ← one key, one value, last write wins
//! ```

mod error;
mod file;
mod memory;
mod session;
mod store;

pub use error::SessionError;
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use session::{SessionConfig, SessionToken};
pub use store::SessionStore;
