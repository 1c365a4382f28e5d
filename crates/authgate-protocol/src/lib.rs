//! Wire protocol for Authgate.
//!
//! This crate defines what the client says to the REST API and how it
//! interprets what comes back:
//!
//! - **Types** ([`Credentials`], [`AccessTokenBody`], [`UserProfile`]):
//!   the JSON bodies that travel on the wire.
//! - **Dispatch** ([`DispatchTable`]): the per-call declaration of which
//!   status codes mean success and which mean a classified failure.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies are
//!   converted to/from bytes.
//!
//! # Architecture
//!
//! ```text
//! Transport (HttpResponse) → Protocol (DispatchTable) → Client (typed outcome)
//! ```

mod codec;
mod dispatch;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::{decode_json, JsonCodec};
pub use dispatch::{DispatchError, DispatchTable, DispatchTableBuilder};
pub use error::ProtocolError;
pub use types::{status, AccessTokenBody, Credentials, UserProfile};
