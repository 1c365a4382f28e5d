//! Wire types for the REST API.
//!
//! These are the JSON bodies the client sends and receives. Field names on
//! the wire (`id`, `password`, `access_token`) are fixed by the server, so
//! the Rust-side names are mapped with `#[serde(rename)]` where they differ.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP status codes the API assigns meaning to.
pub mod status {
    /// Successful authentication or profile fetch.
    pub const OK: u16 = 200;
    /// Account created.
    pub const CREATED: u16 = 201;
    /// Bad credentials, or a missing/invalid bearer token.
    pub const UNAUTHORIZED: u16 = 401;
    /// Identifier already taken.
    pub const CONFLICT: u16 = 409;
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// An (identifier, secret) pair typed in by the user.
///
/// Only ever used as the body of a register or authenticate request;
/// nothing in Authgate stores it. `Debug` prints the identifier but never
/// the secret, so credentials can't leak through a stray `tracing` field.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "id")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Body of a `200` from the authentication endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenBody {
    pub access_token: String,
}

impl fmt::Debug for AccessTokenBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenBody")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Body of a `200` from the current-user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
}
